//! Tests for solver defaults and their agreement with each other

#[cfg(test)]
mod tests {
    use edgematch::io::configuration::{
        DEFAULT_IMAGE_EXTENSION, DEFAULT_IMAGE_PREFIX, DEFAULT_THREADS, DEFAULT_TILE_SET_FILE,
        EDGES_PER_TILE, IMAGE_INDEX_WIDTH, TILE_IMAGE_SIZE,
    };
    use edgematch::io::image::TileImageSource;
    use edgematch::spatial::Side;

    // Tests the tile edge count matches the number of sides
    // Verified by changing EDGES_PER_TILE to 3
    #[test]
    fn test_edges_per_tile_matches_sides() {
        assert_eq!(EDGES_PER_TILE, Side::ALL.len());
    }

    // Tests default tile image names follow tile_NN.jpg
    // Verified by changing the index width
    #[test]
    fn test_default_image_naming() {
        let source = TileImageSource::default();
        assert_eq!(source.prefix, DEFAULT_IMAGE_PREFIX);
        assert_eq!(source.extension, DEFAULT_IMAGE_EXTENSION);
        assert_eq!(source.index_width, IMAGE_INDEX_WIDTH);
        assert_eq!(source.tile_size, TILE_IMAGE_SIZE);
        assert!(source.path_for(3).ends_with("tile_03.jpg"));
    }

    // Tests runtime defaults are usable
    // Verified by setting the default thread count to zero
    #[test]
    fn test_runtime_defaults() {
        assert!(DEFAULT_THREADS >= 1);
        assert!(DEFAULT_TILE_SET_FILE.ends_with(".json"));
    }
}
