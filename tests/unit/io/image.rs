//! Tests for PNG export of tile matrices

#[cfg(test)]
mod tests {

    use ndarray::array;
    use terrawave::io::configuration::TILE_PALETTE;
    use terrawave::io::error::AlgorithmError;
    use terrawave::io::image::{export_tiles_as_png, render_tiles};

    // Tests each tile becomes a scale-sized block of its palette colour
    // Verified by swapping the pixel axes
    #[test]
    fn test_render_tiles() {
        let tiles = array![[0_u8, 7, 3]];
        let img = render_tiles(&tiles, 4).unwrap();

        assert_eq!(img.dimensions(), (12, 4));
        assert_eq!(img.get_pixel(0, 0).0, TILE_PALETTE[0]);
        assert_eq!(img.get_pixel(5, 3).0, TILE_PALETTE[7]);
        assert_eq!(img.get_pixel(11, 2).0, TILE_PALETTE[3]);
    }

    // Tests unknown ordinals render transparent
    // Verified by clamping unknown ordinals to the last colour
    #[test]
    fn test_unknown_tile_is_transparent() {
        let img = render_tiles(&array![[200_u8]], 1).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    // Tests a zero scale is rejected
    // Verified by removing the scale check
    #[test]
    fn test_zero_scale() {
        assert!(matches!(
            render_tiles(&array![[1_u8]], 0),
            Err(AlgorithmError::InvalidParameter {
                parameter: "scale",
                ..
            })
        ));
    }

    // Tests export creates missing parent directories
    // Verified by skipping directory creation
    #[test]
    fn test_export_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("map.png");

        export_tiles_as_png(&array![[1_u8, 2], [3, 4]], 2, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(3, 3).0, TILE_PALETTE[4]);
    }
}
