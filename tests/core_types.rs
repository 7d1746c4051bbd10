use pillarnms::{
    Box3d, ClassNames, NmsConfig, PillarNmsError, PostProcessor, RawBoxes, RAW_BOX_FIELDS,
};

fn record(x: f32, class_id: f32, score: f32) -> [f32; RAW_BOX_FIELDS] {
    [x, 0.0, 0.0, 2.0, 4.0, 1.5, 0.3, class_id, score]
}

#[test]
fn box_rejects_non_finite_score() {
    let err = Box3d::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0, f32::NAN)
        .err()
        .unwrap();
    assert_eq!(
        err,
        PillarNmsError::InvalidCandidate {
            index: 0,
            reason: "score is not finite",
        }
    );

    let err = Box3d::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0, f32::INFINITY)
        .err()
        .unwrap();
    assert!(matches!(err, PillarNmsError::InvalidCandidate { .. }));
}

#[test]
fn box_rejects_negative_extent() {
    let err = Box3d::new(0.0, 0.0, 0.0, 1.0, -1.0, 1.0, 0.0, 0, 0.5)
        .err()
        .unwrap();
    assert_eq!(
        err,
        PillarNmsError::InvalidCandidate {
            index: 0,
            reason: "size is negative",
        }
    );
}

#[test]
fn box_accepts_zero_extent() {
    let bbox = Box3d::new(1.0, 2.0, 3.0, 0.0, 4.0, 1.0, 0.0, 2, 0.4).unwrap();
    assert_eq!(bbox.volume(), 0.0);
    assert_eq!(bbox.class_id(), 2);
}

#[test]
fn box_accessors_follow_raw_order() {
    let raw = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.5, 2.0, 0.75];
    let bbox = Box3d::from_raw(&raw, 0).unwrap();
    assert_eq!(bbox.x(), 1.0);
    assert_eq!(bbox.y(), 2.0);
    assert_eq!(bbox.z(), 3.0);
    assert_eq!(bbox.width(), 4.0);
    assert_eq!(bbox.length(), 5.0);
    assert_eq!(bbox.height(), 6.0);
    assert_eq!(bbox.heading(), 0.5);
    assert_eq!(bbox.class_id(), 2);
    assert_eq!(bbox.score(), 0.75);
    assert_eq!(bbox.to_raw(), raw);
    assert!((bbox.volume() - 120.0).abs() < 1e-9);
    assert_eq!(bbox.z_range(), (0.0, 6.0));
}

#[test]
fn box_corners_without_heading() {
    let bbox = Box3d::new(1.0, 1.0, 0.0, 4.0, 2.0, 1.0, 0.0, 0, 0.5).unwrap();
    let corners = bbox.bev_corners();
    let expected = [[-1.0, 0.0], [3.0, 0.0], [3.0, 2.0], [-1.0, 2.0]];
    for (corner, want) in corners.iter().zip(expected.iter()) {
        assert!((corner[0] - want[0]).abs() < 1e-12);
        assert!((corner[1] - want[1]).abs() < 1e-12);
    }
}

#[test]
fn box_corners_quarter_turn_swap_extents() {
    let bbox = Box3d::new(0.0, 0.0, 0.0, 4.0, 2.0, 1.0, std::f32::consts::FRAC_PI_2, 0, 0.5)
        .unwrap();
    let corners = bbox.bev_corners();
    let xs: Vec<f64> = corners.iter().map(|c| c[0]).collect();
    let ys: Vec<f64> = corners.iter().map(|c| c[1]).collect();
    let x_span = xs.iter().cloned().fold(f64::MIN, f64::max) - xs.iter().cloned().fold(f64::MAX, f64::min);
    let y_span = ys.iter().cloned().fold(f64::MIN, f64::max) - ys.iter().cloned().fold(f64::MAX, f64::min);
    assert!((x_span - 2.0).abs() < 1e-6);
    assert!((y_span - 4.0).abs() < 1e-6);
}

#[test]
fn raw_record_rejects_fractional_class_id() {
    let raw = record(0.0, 1.5, 0.5);
    let err = Box3d::from_raw(&raw, 3).err().unwrap();
    assert_eq!(err, PillarNmsError::InvalidClassId { index: 3, value: 1.5 });

    let raw = record(0.0, -1.0, 0.5);
    let err = Box3d::from_raw(&raw, 4).err().unwrap();
    assert_eq!(err, PillarNmsError::InvalidClassId { index: 4, value: -1.0 });
}

#[test]
fn raw_boxes_rejects_partial_records() {
    let data = [0.0f32; 10];
    let err = RawBoxes::from_slice(&data).err().unwrap();
    assert_eq!(
        err,
        PillarNmsError::InvalidBufferLength {
            len: 10,
            stride: RAW_BOX_FIELDS,
        }
    );
}

#[test]
fn raw_boxes_rejects_count_beyond_capacity() {
    let data = [0.0f32; 18];
    let err = RawBoxes::new(&data, 3).err().unwrap();
    assert_eq!(err, PillarNmsError::BufferTooSmall { needed: 27, got: 18 });
}

#[test]
fn raw_boxes_only_visits_valid_records() {
    let mut data = Vec::new();
    data.extend_from_slice(&record(0.0, 0.0, 0.9));
    data.extend_from_slice(&record(10.0, 1.0, 0.8));
    data.extend_from_slice(&[f32::NAN; RAW_BOX_FIELDS]);

    let raw = RawBoxes::new(&data, 2).unwrap();
    assert_eq!(raw.len(), 2);
    assert_eq!(raw.capacity(), 3);
    assert!(!raw.is_empty());
    assert!(raw.record(1).is_some());
    assert!(raw.record(2).is_none());
    assert_eq!(raw.records().count(), 2);

    let boxes = raw.to_boxes().unwrap();
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[1].x(), 10.0);
    assert_eq!(boxes[1].class_id(), 1);
}

#[test]
fn raw_boxes_reports_bad_record_index() {
    let mut data = Vec::new();
    data.extend_from_slice(&record(0.0, 0.0, 0.9));
    data.extend_from_slice(&record(1.0, 0.0, f32::NAN));
    let raw = RawBoxes::from_slice(&data).unwrap();
    let err = raw.to_boxes().err().unwrap();
    assert_eq!(
        err,
        PillarNmsError::InvalidCandidate {
            index: 1,
            reason: "score is not finite",
        }
    );
}

#[test]
fn class_names_parse_trims_labels() {
    let names = ClassNames::parse_list(" Car, Pedestrian ,Cyclist,").unwrap();
    assert_eq!(names.len(), 3);
    assert_eq!(names.get(1), Some("Pedestrian"));
    assert_eq!(names.get(3), None);
    assert_eq!(
        names.iter().collect::<Vec<_>>(),
        vec!["Car", "Pedestrian", "Cyclist"]
    );
}

#[test]
fn class_names_reject_empty_labels() {
    let err = ClassNames::parse_list("Car,,Cyclist").err().unwrap();
    assert_eq!(err, PillarNmsError::EmptyClassName { index: 1 });

    let err = ClassNames::new(["Car", " "]).err().unwrap();
    assert_eq!(err, PillarNmsError::EmptyClassName { index: 1 });

    assert!(ClassNames::parse_list("").unwrap().is_empty());
}

#[test]
fn class_names_resolve_out_of_range() {
    let names = ClassNames::new(["a", "b", "c", "d", "e"]).unwrap();
    let err = names.resolve(7).err().unwrap();
    assert_eq!(
        err,
        PillarNmsError::ClassIdOutOfRange {
            class_id: 7,
            num_classes: 5,
        }
    );
    assert_eq!(
        err.to_string(),
        "class id 7 out of range for 5 class names"
    );
}

#[test]
fn nms_config_validation() {
    assert!(NmsConfig::default().validate().is_ok());
    assert!(NmsConfig::new(0.0, 1).validate().is_ok());
    assert!(NmsConfig::new(1.0, 1).validate().is_ok());

    assert_eq!(
        NmsConfig::new(1.5, 10).validate().err().unwrap(),
        PillarNmsError::InvalidIouThreshold { value: 1.5 }
    );
    assert_eq!(
        NmsConfig::new(-0.1, 10).validate().err().unwrap(),
        PillarNmsError::InvalidIouThreshold { value: -0.1 }
    );
    assert!(matches!(
        NmsConfig::new(f32::NAN, 10).validate(),
        Err(PillarNmsError::InvalidIouThreshold { .. })
    ));
    assert_eq!(
        NmsConfig::new(0.5, 0).validate().err().unwrap(),
        PillarNmsError::InvalidMaxOutput { value: 0 }
    );
}

#[test]
fn post_processor_rejects_invalid_config() {
    let names = ClassNames::new(["Car"]).unwrap();
    let err = PostProcessor::new(NmsConfig::new(0.5, 0), names).err().unwrap();
    assert_eq!(err, PillarNmsError::InvalidMaxOutput { value: 0 });
}
