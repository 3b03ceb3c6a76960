use crate::focal_plane::common::error::MaskError;
use crate::focal_plane::layout::{InstrumentKind, InstrumentLayout, SensorRecord, get_layout};

fn two_by_two() -> InstrumentLayout {
    InstrumentLayout::builder()
        .name("toy")
        .tile_grid(2, 2)
        .tile_size(100.0, 100.0)
        .tile_gap(10.0)
        .chip_size(100.0, 100.0)
        .sensor(SensorRecord::new(1, "A", (0, 1), (0, 1)))
        .sensor(SensorRecord::new(2, "B", (1, 2), (1, 2)))
        .build()
        .unwrap()
}

#[test]
fn test_two_by_two_scenario() {
    let layout = two_by_two();

    assert_eq!(layout.sensor_rect("A").unwrap(), ((0.0, 100.0), (0.0, 100.0)));
    assert_eq!(layout.sensor_rect("B").unwrap(), ((110.0, 210.0), (110.0, 210.0)));
    assert!(layout.locate(105.0, 5.0).is_none());
    assert_eq!(layout.locate(5.0, 5.0).unwrap().chip_name, "A");
    assert_eq!(layout.locate(150.0, 199.0).unwrap().chip_name, "B");
    // tile (1, 0) holds no sensor
    assert!(layout.locate(150.0, 50.0).is_none());
}

#[test]
fn test_xy_from_tile() {
    let layout = two_by_two();

    assert_eq!(layout.xy_from_tile(1, 0, 3.0, 4.0).unwrap(), (113.0, 4.0));
    assert_eq!(layout.xy_from_tile(1, 1, 0.5, 0.5).unwrap(), (110.5, 110.5));
}

#[test]
fn test_tile_out_of_range() {
    let layout = two_by_two();

    let err = layout.xy_from_tile(2, 0, 0.0, 0.0).unwrap_err();
    assert!(matches!(
        err,
        MaskError::OutOfRangeError { tile_x: 2, tile_y: 0, ntx: 2, nty: 2 }
    ));
    assert!(matches!(
        layout.tile_rect(0, 5),
        Err(MaskError::OutOfRangeError { .. })
    ));
}

#[test]
fn test_adjacent_tiles_separated_by_gap() {
    let layout = get_layout("decam", 1.0).unwrap();
    let (ntx, nty) = layout.tile_grid();
    let (_, _, gap) = layout.tile_size();

    for tx in 0..ntx {
        for ty in 0..nty {
            let ((_, right), (_, top)) = layout.tile_rect(tx, ty).unwrap();
            if tx + 1 < ntx {
                let ((next_left, _), _) = layout.tile_rect(tx + 1, ty).unwrap();
                assert!(next_left > right);
                assert!((next_left - right - gap).abs() < 1e-9);
            }
            if ty + 1 < nty {
                let (_, (next_bottom, _)) = layout.tile_rect(tx, ty + 1).unwrap();
                assert!(next_bottom > top);
                assert!((next_bottom - top - gap).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_tile_bin_edges_per_row() {
    let layout = two_by_two();
    let (x_edges, y_edges) = layout.tile_bin_edges();

    assert_eq!(x_edges, vec![(0.0, 100.0), (110.0, 210.0)]);
    assert_eq!(y_edges, vec![(0.0, 100.0), (110.0, 210.0)]);
}

#[test]
fn test_lookup() {
    let layout = two_by_two();

    assert_eq!(layout.lookup_by_extension(2).unwrap().chip_name, "B");
    assert_eq!(layout.lookup_by_name("A").unwrap().extension_id, 1);
    assert!(matches!(
        layout.lookup_by_extension(7),
        Err(MaskError::NotFoundError(_))
    ));
    assert!(matches!(
        layout.sensor_rect("C"),
        Err(MaskError::NotFoundError(_))
    ));
}

#[test]
fn test_enumeration_follows_declaration_order() {
    let layout = InstrumentLayout::builder()
        .tile_grid(3, 1)
        .tile_size(10.0, 10.0)
        .sensor(SensorRecord::new(9, "late", (2, 3), (0, 1)))
        .sensor(SensorRecord::new(1, "early", (0, 1), (0, 1)))
        .build()
        .unwrap();

    let first: Vec<_> = layout.enumerate_sensors().collect();
    let second: Vec<_> = layout.enumerate_sensors().collect();
    assert_eq!(first, vec![(9, "late"), (1, "early")]);
    assert_eq!(first, second);
}

#[test]
fn test_decam_table() {
    let layout = get_layout("decam", 1.0).unwrap();

    assert_eq!(layout.sensor_count(), 60);
    assert_eq!(layout.enumerate_sensors().next(), Some((1, "S29")));
    assert_eq!(layout.layout_extent(), ((1, 13), (0, 14)));
    assert_eq!(layout.layout_size(), (12, 14));
    assert_eq!(layout.lookup_by_extension(31).unwrap().chip_name, "N1");

    let ((left, right), (bottom, top)) = layout.sensor_rect("S29").unwrap();
    assert_eq!((left, bottom), (2228.0, 4.0 * 2228.0));
    assert_eq!((right - left, top - bottom), (2046.0, 4094.0));
}

#[test]
fn test_decam_locate() {
    let layout = get_layout("decam", 1.0).unwrap();

    let sensor = layout.locate(2228.0 + 10.0, 4.0 * 2228.0 + 10.0).unwrap();
    assert_eq!(sensor.chip_name, "S29");
    // inter-row gap inside S29's own tile span
    let (x, y) = (2228.0 + 10.0, 4.0 * 2228.0 + 2048.0 + 5.0);
    let ((left, right), (bottom, top)) = layout.sensor_rect("S29").unwrap();
    assert!((left..right).contains(&x) && (bottom..top).contains(&y));
    assert!(layout.locate(x, y).is_none());
    assert!(layout.locate(-1.0, 10.0).is_none());
    assert!(layout.locate(14.0 * 2228.0, 10.0).is_none());
    assert_eq!(layout.locate_tile(1, 5).unwrap().chip_name, "S29");
    assert!(layout.locate_tile(0, 0).is_none());
}

#[test]
fn test_binning_scales_geometry() {
    let layout = get_layout("decam", 2.0).unwrap();

    assert_eq!(layout.tile_size(), (1024.0, 1024.0, 90.0));
    assert_eq!(layout.chip_size(), (1023.0, 2047.0));
    assert!((layout.sky_footprint().pixel_scale - 0.5246).abs() < 1e-12);
}

#[test]
fn test_registry_is_case_insensitive() {
    assert_eq!("DECam".parse::<InstrumentKind>().unwrap(), InstrumentKind::Decam);
    assert_eq!(" PODI ".parse::<InstrumentKind>().unwrap(), InstrumentKind::OdiPartial);
    assert_eq!("5odi".parse::<InstrumentKind>().unwrap(), InstrumentKind::Odi5x6);
    assert!(matches!(
        get_layout("hsc", 1.0),
        Err(MaskError::ConfigurationError(_))
    ));
    assert!(matches!(
        get_layout("decam", 0.0),
        Err(MaskError::ConfigurationError(_))
    ));
}

#[test]
fn test_every_builtin_layout_builds() {
    for kind in InstrumentKind::ALL {
        let layout = kind.layout(1.0).unwrap();
        assert_eq!(layout.kind(), Some(kind));
        assert_eq!(layout.name(), kind.key());
    }
}

#[test]
fn test_odi_codes_address_tiles() {
    let layout = get_layout("5odi", 1.0).unwrap();

    assert_eq!(layout.sensor_count(), 30);
    let ota = layout.lookup_by_name("33").unwrap();
    assert_eq!(ota.extension_id, 33);
    assert_eq!((ota.tile_x_start, ota.tile_y_start), (2, 2));
    assert_eq!(layout.layout_extent(), ((0, 5), (0, 6)));

    let partial = get_layout("podi", 1.0).unwrap();
    assert_eq!(partial.enumerate_sensors().next(), Some((33, "33")));
    assert_eq!(partial.lookup_by_extension(61).unwrap().tile_x_start, 5);
}

#[test]
fn test_builder_rejects_bad_tables() {
    let base = || {
        InstrumentLayout::builder()
            .tile_grid(2, 2)
            .tile_size(10.0, 10.0)
    };

    let duplicate_ext = base()
        .sensor(SensorRecord::new(1, "A", (0, 1), (0, 1)))
        .sensor(SensorRecord::new(1, "B", (1, 2), (0, 1)))
        .build();
    assert!(matches!(duplicate_ext, Err(MaskError::ConfigurationError(_))));

    let duplicate_name = base()
        .sensor(SensorRecord::new(1, "A", (0, 1), (0, 1)))
        .sensor(SensorRecord::new(2, "A", (1, 2), (0, 1)))
        .build();
    assert!(matches!(duplicate_name, Err(MaskError::ConfigurationError(_))));

    let off_grid = base()
        .sensor(SensorRecord::new(1, "A", (1, 3), (0, 1)))
        .build();
    assert!(matches!(off_grid, Err(MaskError::ConfigurationError(_))));

    let empty_span = base()
        .sensor(SensorRecord::new(1, "A", (1, 1), (0, 1)))
        .build();
    assert!(matches!(empty_span, Err(MaskError::ConfigurationError(_))));

    let overlapping = base()
        .sensor(SensorRecord::new(1, "A", (0, 2), (0, 1)))
        .sensor(SensorRecord::new(2, "B", (1, 2), (0, 2)))
        .build();
    assert!(matches!(overlapping, Err(MaskError::ConfigurationError(_))));

    assert!(matches!(base().build(), Err(MaskError::ConfigurationError(_))));
}

#[test]
fn test_sky_footprint() {
    let layout = get_layout("decam", 1.0).unwrap();
    let half = 70.0 / 60.0;

    let (w, e, s, n) = layout.sky_bbox(None);
    assert!((w + half).abs() < 1e-12 && (e - half).abs() < 1e-12);
    assert!((s + half).abs() < 1e-12 && (n - half).abs() < 1e-12);

    let (w, e, s, n) = layout.sky_bbox(Some((150.0, 60.0)));
    assert!((w - (150.0 - 2.0 * half)).abs() < 1e-9);
    assert!((e - (150.0 + 2.0 * half)).abs() < 1e-9);
    assert!((s - (60.0 - half)).abs() < 1e-9 && (n - (60.0 + half)).abs() < 1e-9);

    let (ra, dec, width, height) = layout.sky_cbox(Some((10.0, 0.0)));
    assert!((ra - 10.0).abs() < 1e-9 && dec.abs() < 1e-9);
    assert!((width - 2.0 * half).abs() < 1e-9 && (height - 2.0 * half).abs() < 1e-9);
}

#[test]
fn test_layout_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InstrumentLayout>();

    let layout = std::sync::Arc::new(get_layout("podi", 1.0).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let layout = layout.clone();
            std::thread::spawn(move || layout.sensor_rect("33").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), layout.sensor_rect("33").unwrap());
    }
}
