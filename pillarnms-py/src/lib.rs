//! Python bindings for the pillarnms box post-processing library.
//!
//! Candidate arrays are `float32` with shape `(N, 9)`, one row per box in the
//! network's `x y z w l h rt id score` layout.

use numpy::{PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use pillarnms::{
    iou_3d as rust_iou_3d, Box3d as RustBox3d, ClassMode, ClassNames, NmsConfig as RustNmsConfig,
    PillarNmsError, PostProcessor, RawBoxes, RAW_BOX_FIELDS,
};

/// Convert a PillarNmsError to a Python exception.
fn to_py_err(err: PillarNmsError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn class_mode(per_class: bool) -> ClassMode {
    if per_class {
        ClassMode::PerClass
    } else {
        ClassMode::Agnostic
    }
}

/// Borrow an `(N, 9)` array as raw records, keeping the first `count` rows.
fn raw_view<'a>(
    array: &'a PyReadonlyArray2<'_, f32>,
    count: Option<usize>,
) -> PyResult<RawBoxes<'a>> {
    let shape = array.shape();
    if shape[1] != RAW_BOX_FIELDS {
        return Err(PyValueError::new_err(format!(
            "boxes must have shape (N, {RAW_BOX_FIELDS}), got ({}, {})",
            shape[0], shape[1]
        )));
    }
    let data = array.as_slice()?;
    match count {
        Some(count) => RawBoxes::new(data, count).map_err(to_py_err),
        None => RawBoxes::from_slice(data).map_err(to_py_err),
    }
}

/// An oriented 3-D detection box.
#[pyclass]
#[derive(Clone)]
pub struct Box3d {
    inner: RustBox3d,
}

#[pymethods]
impl Box3d {
    #[new]
    #[pyo3(signature = (x, y, z, w, l, h, rt, class_id = 0, score = 0.0))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        x: f32,
        y: f32,
        z: f32,
        w: f32,
        l: f32,
        h: f32,
        rt: f32,
        class_id: u32,
        score: f32,
    ) -> PyResult<Self> {
        let inner = RustBox3d::new(x, y, z, w, l, h, rt, class_id, score).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn x(&self) -> f32 {
        self.inner.x()
    }

    #[getter]
    fn y(&self) -> f32 {
        self.inner.y()
    }

    #[getter]
    fn z(&self) -> f32 {
        self.inner.z()
    }

    #[getter]
    fn w(&self) -> f32 {
        self.inner.width()
    }

    #[getter]
    fn l(&self) -> f32 {
        self.inner.length()
    }

    #[getter]
    fn h(&self) -> f32 {
        self.inner.height()
    }

    #[getter]
    fn rt(&self) -> f32 {
        self.inner.heading()
    }

    #[getter]
    fn class_id(&self) -> u32 {
        self.inner.class_id()
    }

    #[getter]
    fn score(&self) -> f32 {
        self.inner.score()
    }

    /// The box as a 9-element list in raw record order.
    fn to_list(&self) -> Vec<f32> {
        self.inner.to_raw().to_vec()
    }

    fn __repr__(&self) -> String {
        let b = &self.inner;
        format!(
            "Box3d(x={:.3}, y={:.3}, z={:.3}, w={:.3}, l={:.3}, h={:.3}, rt={:.3}, class_id={}, score={:.4})",
            b.x(),
            b.y(),
            b.z(),
            b.width(),
            b.length(),
            b.height(),
            b.heading(),
            b.class_id(),
            b.score()
        )
    }
}

impl From<RustBox3d> for Box3d {
    fn from(inner: RustBox3d) -> Self {
        Self { inner }
    }
}

/// Suppression settings.
#[pyclass]
#[derive(Clone)]
pub struct NmsConfig {
    inner: RustNmsConfig,
}

#[pymethods]
impl NmsConfig {
    /// Create a new NmsConfig.
    ///
    /// Args:
    ///     iou_threshold: Overlap at or above which a box is dropped (default: 0.01)
    ///     max_output: Top-scored candidates considered (default: 4096)
    ///     per_class: Only suppress boxes sharing a class id (default: False)
    ///     parallel: Build the overlap mask in parallel (default: False)
    #[new]
    #[pyo3(signature = (iou_threshold = 0.01, max_output = 4096, per_class = false, parallel = false))]
    fn new(iou_threshold: f32, max_output: usize, per_class: bool, parallel: bool) -> PyResult<Self> {
        let inner = RustNmsConfig::new(iou_threshold, max_output)
            .with_class_mode(class_mode(per_class))
            .with_parallel(parallel);
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn iou_threshold(&self) -> f32 {
        self.inner.iou_threshold
    }

    #[getter]
    fn max_output(&self) -> usize {
        self.inner.max_output
    }

    #[getter]
    fn per_class(&self) -> bool {
        self.inner.class_mode == ClassMode::PerClass
    }

    fn __repr__(&self) -> String {
        format!(
            "NmsConfig(iou_threshold={}, max_output={}, per_class={}, parallel={})",
            self.inner.iou_threshold,
            self.inner.max_output,
            self.per_class(),
            self.inner.parallel
        )
    }
}

/// Greedy 3-D NMS over an `(N, 9)` float32 array; returns kept boxes by score.
#[pyfunction]
#[pyo3(signature = (boxes, iou_threshold = 0.01, max_output = 4096, per_class = false))]
fn suppress(
    boxes: PyReadonlyArray2<'_, f32>,
    iou_threshold: f32,
    max_output: usize,
    per_class: bool,
) -> PyResult<Vec<Box3d>> {
    let config = RustNmsConfig::new(iou_threshold, max_output)
        .with_class_mode(class_mode(per_class))
        .with_parallel(true);
    let candidates = raw_view(&boxes, None)?.to_boxes().map_err(to_py_err)?;
    let kept = pillarnms::suppress_with(&candidates, &config).map_err(to_py_err)?;
    Ok(kept.into_iter().map(Box3d::from).collect())
}

/// Greedy 3-D NMS driven by an `NmsConfig`.
#[pyfunction]
fn suppress_with(boxes: PyReadonlyArray2<'_, f32>, config: PyRef<'_, NmsConfig>) -> PyResult<Vec<Box3d>> {
    let candidates = raw_view(&boxes, None)?.to_boxes().map_err(to_py_err)?;
    let kept = pillarnms::suppress_with(&candidates, &config.inner).map_err(to_py_err)?;
    Ok(kept.into_iter().map(Box3d::from).collect())
}

/// Rotated 3-D IoU of two boxes.
#[pyfunction]
fn iou_3d(a: PyRef<'_, Box3d>, b: PyRef<'_, Box3d>) -> f32 {
    rust_iou_3d(&a.inner, &b.inner)
}

/// Decode, suppress and label a frame; returns `(label, Box3d)` pairs.
///
/// Only the first `count` rows are used when `count` is given.
#[pyfunction]
#[pyo3(signature = (boxes, class_names, iou_threshold = 0.01, max_output = 4096, count = None))]
fn postprocess(
    boxes: PyReadonlyArray2<'_, f32>,
    class_names: Vec<String>,
    iou_threshold: f32,
    max_output: usize,
    count: Option<usize>,
) -> PyResult<Vec<(String, Box3d)>> {
    let names = ClassNames::new(class_names).map_err(to_py_err)?;
    let config = RustNmsConfig::new(iou_threshold, max_output).with_parallel(true);
    let processor = PostProcessor::new(config, names).map_err(to_py_err)?;
    let detections = processor
        .process(raw_view(&boxes, count)?)
        .map_err(to_py_err)?;
    Ok(detections
        .into_iter()
        .map(|det| (det.label, Box3d::from(det.bbox)))
        .collect())
}

#[pymodule]
fn _pillarnms(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Box3d>()?;
    m.add_class::<NmsConfig>()?;
    m.add_function(wrap_pyfunction!(suppress, m)?)?;
    m.add_function(wrap_pyfunction!(suppress_with, m)?)?;
    m.add_function(wrap_pyfunction!(iou_3d, m)?)?;
    m.add_function(wrap_pyfunction!(postprocess, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
