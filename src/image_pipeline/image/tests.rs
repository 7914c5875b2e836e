use crate::image_pipeline::image::{Color, Image};

#[test]
fn test_new_fills_every_pixel() {
    let fill = Color::rgb(10, 20, 30);
    let image = Image::new(3, 2, fill);

    assert_eq!(image.width(), 3);
    assert_eq!(image.height(), 2);
    assert_eq!(image.pixels().len(), 6);
    assert!(image.pixels().iter().all(|&c| c == fill));
    assert!(image.is_valid());
}

#[test]
fn test_default_is_invalid_sentinel() {
    let image = Image::default();

    assert_eq!(image.width(), 0);
    assert_eq!(image.height(), 0);
    assert!(!image.is_valid());
    assert_eq!(image.rows().count(), 0);
}

#[test]
fn test_row_access_is_bounds_checked() {
    let mut image = Image::new(2, 2, Color::black());

    assert!(image.row(1).is_some());
    assert!(image.row(2).is_none());
    assert!(image.row_mut(5).is_none());
    assert_eq!(image.pixel(2, 0), None);
    assert!(!image.set_pixel(0, 2, Color::white()));
}

#[test]
fn test_set_pixel_targets_row_major_slot() {
    let mut image = Image::new(3, 2, Color::black());
    assert!(image.set_pixel(2, 1, Color::rgb(1, 2, 3)));

    assert_eq!(image.pixels()[5], Color::rgb(1, 2, 3));
    assert_eq!(image.row(1).map(|row| row[2]), Some(Color::rgb(1, 2, 3)));
    assert_eq!(image.pixel(2, 1), Some(Color::rgb(1, 2, 3)));
}

#[test]
fn test_rows_iterate_top_to_bottom_and_reverse() {
    let mut image = Image::new(2, 3, Color::black());
    for (y, row) in image.rows_mut().enumerate() {
        row.fill(Color::rgb(y as u8, 0, 0));
    }

    let reds: Vec<u8> = image.rows().map(|row| row[0].r).collect();
    assert_eq!(reds, vec![0, 1, 2]);

    let reds_rev: Vec<u8> = image.rows().rev().map(|row| row[1].r).collect();
    assert_eq!(reds_rev, vec![2, 1, 0]);
}

#[test]
fn test_from_pixels_checks_length() {
    assert!(Image::from_pixels(2, 2, vec![Color::black(); 4]).is_some());
    assert!(Image::from_pixels(2, 2, vec![Color::black(); 3]).is_none());
    assert!(Image::from_pixels(usize::MAX, 2, Vec::new()).is_none());
}

#[test]
fn test_color_defaults_to_opaque() {
    assert_eq!(Color::default(), Color::rgba(0, 0, 0, 255));
    assert_eq!(Color::rgb(1, 2, 3).a, Color::OPAQUE);
    assert!(Color::rgba(1, 2, 3, 0).same_rgb(&Color::rgb(1, 2, 3)));
}
