//! End-to-end checks for the texture pipeline and the glyph atlas.

use texforge_core::{IndexedBuffer, Palette, Pixel, PixelBuffer, RgbaBuffer};
use texforge_processing::{
    pack_atlas, GlyphSheet, MetalType, TexturePipeline, TextureSettings, ATLAS_DIM,
};

fn temp_settings_path() -> std::path::PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("texforge_settings_{id}.toml"))
}

fn weapon_palette() -> Palette {
    let mut palette = Palette::grayscale();
    for (i, index) in (0x90u8..=0x9F).enumerate() {
        palette.set(index, Pixel::rgb(0, 0, 100 + i as u8));
    }
    palette
}

#[test]
fn test_settings_file_drives_pipeline() {
    let path = temp_settings_path();
    std::fs::write(
        &path,
        r#"
        alpha_index = 0
        border_size = 1
        dilate = true
        create_normal_map = true
        normal_strength = 2.0
        metal = "dwarven"
        "#,
    )
    .unwrap();

    let settings = TextureSettings::from_toml_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(settings.metal, MetalType::Dwarven);

    let pipeline = TexturePipeline::new(settings, weapon_palette()).unwrap();

    // 0 is transparent, 0x70 tints to 0x90, 0x71 to 0x91.
    #[rustfmt::skip]
    let src = IndexedBuffer::new(3, 3, vec![
        0,    0x70, 0,
        0x70, 0x71, 0x70,
        0,    0x70, 0,
    ])
    .unwrap();

    let out = pipeline.process(&PixelBuffer::from(src)).unwrap();
    let albedo = &out.albedo;
    assert_eq!((albedo.width(), albedo.height()), (5, 5));
    assert_eq!(albedo.get(2, 1), Some(Pixel::rgb(0, 0, 100)));
    assert_eq!(albedo.get(2, 2), Some(Pixel::rgb(0, 0, 101)));

    // Transparent corners of the content picked up colour from dilation.
    let corner = albedo.get(1, 1).unwrap();
    assert_eq!(corner.a, 0);
    assert_ne!(corner, Pixel::CLEAR);

    let normal = out.normal.unwrap();
    assert_eq!(normal.size(), albedo.size());
}

#[test]
fn test_rgba_source_ignores_palette_options() {
    let settings = TextureSettings {
        alpha_index: Some(0),
        metal: MetalType::Ebony,
        ..TextureSettings::default()
    };
    let pipeline = TexturePipeline::new(settings, Palette::grayscale()).unwrap();
    let src = RgbaBuffer::filled(2, 2, Pixel::rgba(0, 0, 0, 255));
    let out = pipeline.process(&PixelBuffer::from(src.clone())).unwrap();
    assert_eq!(out.albedo, src);
}

#[test]
fn test_source_is_not_modified() {
    let pipeline = TexturePipeline::new(
        TextureSettings {
            sharpen: true,
            metal: MetalType::Iron,
            ..TextureSettings::tiled(1)
        },
        Palette::grayscale(),
    )
    .unwrap();
    let src = PixelBuffer::from(IndexedBuffer::filled(4, 4, 0x75));
    let before = src.clone();
    pipeline.process(&src).unwrap();
    assert_eq!(src, before);
}

#[test]
fn test_full_font_atlas() {
    // 128 glyphs of 16px: eight rows of sixteen.
    let cell = 16u32;
    let count = 128usize;
    let area = (cell * cell) as usize;
    let mut coverage = vec![0u8; area * count];
    for (i, glyph) in coverage.chunks_exact_mut(area).enumerate() {
        // Mark the top-left pixel of odd glyphs only.
        glyph[0] = (i % 2) as u8;
    }
    let widths = (0..count).map(|i| 4 + (i % 8) as u32).collect();
    let sheet = GlyphSheet::new(cell, 11, widths, coverage).unwrap();

    let back = Pixel::rgba(0, 0, 0, 0);
    let text = Pixel::rgba(255, 255, 255, 255);
    let packed = pack_atlas(&sheet, back, text).unwrap();

    assert_eq!(packed.atlas.width(), ATLAS_DIM);
    assert_eq!(packed.rects.len(), count);

    let dim = ATLAS_DIM as f32;
    for (i, rect) in packed.rects.iter().enumerate() {
        let x = (i as u32 % 16) * cell;
        let y = (i as u32 / 16) * cell;
        let width = 4 + (i % 8) as u32;
        assert_eq!(rect.x_min, x as f32 / dim);
        assert_eq!(rect.x_max, (x + width) as f32 / dim);
        assert_eq!(rect.y_min, (y + 11) as f32 / dim);
        assert_eq!(rect.y_max, y as f32 / dim);

        let marker = if i % 2 == 1 { text } else { back };
        assert_eq!(packed.atlas.get(x, y), Some(marker));
    }

    // Below the last row nothing was painted.
    assert_eq!(packed.atlas.get(0, 8 * cell), Some(Pixel::CLEAR));
}
