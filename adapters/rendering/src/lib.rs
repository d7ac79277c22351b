#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Fog Maze adapters.
//!
//! Adapters snapshot the world into a [`Scene`] and hand it to a
//! [`RenderingBackend`]. Pixel backends draw the [`TileDraw`] rectangles
//! produced by [`compose_frame`], or fill a pixel grid with [`rasterize`];
//! plain terminal backends print [`text_frame`].

use anyhow::Result as AnyResult;
use fog_maze_core::{
    CellCoord, CellRect, CellRectSize, Grid, PlayMode, Shade, Terrain, ViewportConfig,
};
use glam::Vec2;
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Byte RGB values, clamping channels to 0.0..=1.0 and ignoring alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
            .map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Colors assigned to every drawable element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Plain floor.
    pub floor: Color,
    /// Floor on alternating rows.
    pub floor_accent: Color,
    /// Authored walls and the outer margin.
    pub wall: Color,
    /// Level exit.
    pub exit: Color,
    /// Player marker.
    pub player: Color,
    /// Fogged cells.
    pub shadow: Color,
    /// Frame drawn around the viewport.
    pub frame: Color,
}

impl Palette {
    /// Color used for a terrain cell.
    ///
    /// The outer margin is drawn like any other wall; only its behavior differs.
    #[must_use]
    pub const fn terrain(&self, terrain: Terrain) -> Color {
        match terrain {
            Terrain::Floor => self.floor,
            Terrain::FloorAccent => self.floor_accent,
            Terrain::Wall | Terrain::Border => self.wall,
            Terrain::Exit => self.exit,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            floor: Color::from_rgb_u8(0x04, 0xB4, 0x04),
            floor_accent: Color::from_rgb_u8(0x08, 0x8A, 0x08),
            wall: Color::from_rgb_u8(128, 128, 128),
            exit: Color::from_rgb_u8(255, 255, 0),
            player: Color::from_rgb_u8(0, 0, 255),
            shadow: Color::from_rgb_u8(0, 0, 0),
            frame: Color::from_rgb_u8(128, 0, 128),
        }
    }
}

/// Pixel geometry of the canvas holding the viewport.
///
/// The viewport is surrounded by a frame `frame_blocks` cells thick, so
/// viewport cell `(column, row)` is drawn at `(column + frame_blocks) * block_size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLayout {
    viewport: CellRectSize,
    block_size: f32,
    frame_blocks: u32,
}

impl CanvasLayout {
    /// Side length of a block in pixels when none is configured.
    pub const DEFAULT_BLOCK_SIZE: f32 = 10.0;

    /// Thickness of the viewport frame in blocks.
    pub const DEFAULT_FRAME_BLOCKS: u32 = 1;

    /// Creates a layout for the given viewport.
    ///
    /// Returns an error when `block_size` is not a positive, finite length.
    pub fn new(
        viewport: CellRectSize,
        block_size: f32,
        frame_blocks: u32,
    ) -> Result<Self, RenderingError> {
        if !(block_size.is_finite() && block_size > 0.0) {
            return Err(RenderingError::InvalidBlockSize { block_size });
        }

        Ok(Self {
            viewport,
            block_size,
            frame_blocks,
        })
    }

    /// Layout with 10 px blocks and a one block frame.
    #[must_use]
    pub const fn for_viewport(config: &ViewportConfig) -> Self {
        Self {
            viewport: config.size(),
            block_size: Self::DEFAULT_BLOCK_SIZE,
            frame_blocks: Self::DEFAULT_FRAME_BLOCKS,
        }
    }

    /// Side length of a block in pixels.
    #[must_use]
    pub const fn block_size(&self) -> f32 {
        self.block_size
    }

    /// Canvas width in pixels, frame included.
    #[must_use]
    pub fn width(&self) -> f32 {
        (self.viewport.width() + 2 * self.frame_blocks) as f32 * self.block_size
    }

    /// Canvas height in pixels, frame included.
    #[must_use]
    pub fn height(&self) -> f32 {
        (self.viewport.height() + 2 * self.frame_blocks) as f32 * self.block_size
    }

    /// Top-left pixel of a viewport cell.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            (cell.column() + self.frame_blocks) as f32,
            (cell.row() + self.frame_blocks) as f32,
        ) * self.block_size
    }

    fn block(&self, cell: CellCoord, color: Color) -> TileDraw {
        TileDraw::new(
            self.cell_origin(cell),
            Vec2::splat(self.block_size),
            color,
        )
    }

    fn frame_strips(&self, color: Color) -> [TileDraw; 4] {
        let thickness = self.frame_blocks as f32 * self.block_size;
        let (width, height) = (self.width(), self.height());
        [
            TileDraw::new(Vec2::ZERO, Vec2::new(thickness, height), color),
            TileDraw::new(Vec2::ZERO, Vec2::new(width, thickness), color),
            TileDraw::new(
                Vec2::new(0.0, height - thickness),
                Vec2::new(width, thickness),
                color,
            ),
            TileDraw::new(
                Vec2::new(width - thickness, 0.0),
                Vec2::new(thickness, height),
                color,
            ),
        ]
    }
}

/// Solid rectangle emitted by [`compose_frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileDraw {
    /// Top-left corner in pixels.
    pub position: Vec2,
    /// Width and height in pixels.
    pub size: Vec2,
    /// Fill color.
    pub color: Color,
}

impl TileDraw {
    /// Creates a new rectangle descriptor.
    #[must_use]
    pub const fn new(position: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            position,
            size,
            color,
        }
    }
}

/// Snapshot of everything visible through the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    terrain: Grid<Terrain>,
    shades: Grid<Shade>,
    player: CellCoord,
    play_mode: PlayMode,
}

impl Scene {
    /// Creates a new scene descriptor.
    ///
    /// Returns an error when the terrain and fog grids disagree on size or the
    /// player lies outside them.
    pub fn new(
        terrain: Grid<Terrain>,
        shades: Grid<Shade>,
        player: CellCoord,
        play_mode: PlayMode,
    ) -> Result<Self, RenderingError> {
        if terrain.size() != shades.size() {
            return Err(RenderingError::MismatchedLayers {
                terrain: terrain.size(),
                shades: shades.size(),
            });
        }
        if !terrain.contains(player) {
            return Err(RenderingError::PlayerOutsideViewport { player });
        }

        Ok(Self {
            terrain,
            shades,
            player,
            play_mode,
        })
    }

    /// Terrain covered by the viewport.
    #[must_use]
    pub const fn terrain(&self) -> &Grid<Terrain> {
        &self.terrain
    }

    /// Fog covering the viewport.
    #[must_use]
    pub const fn shades(&self) -> &Grid<Shade> {
        &self.shades
    }

    /// Viewport cell the player is drawn on.
    #[must_use]
    pub const fn player(&self) -> CellCoord {
        self.player
    }

    /// Active play mode.
    #[must_use]
    pub const fn play_mode(&self) -> PlayMode {
        self.play_mode
    }
}

/// Converts a scene into colored rectangles in back-to-front order.
///
/// Terrain comes first, then the player, then the frame and finally the fog,
/// which covers every shadowed cell.
#[must_use]
pub fn compose_frame(scene: &Scene, layout: &CanvasLayout, palette: &Palette) -> Vec<TileDraw> {
    let mut draws = Vec::with_capacity(scene.terrain.cells().len() * 2 + 5);

    for (row, line) in scene.terrain.rows().enumerate() {
        for (column, terrain) in line.iter().enumerate() {
            let cell = CellCoord::new(column as u32, row as u32);
            draws.push(layout.block(cell, palette.terrain(*terrain)));
        }
    }
    draws.push(layout.block(scene.player, palette.player));
    draws.extend(layout.frame_strips(palette.frame));

    for (row, line) in scene.shades.rows().enumerate() {
        for (column, shade) in line.iter().enumerate() {
            if *shade == Shade::Shadow {
                let cell = CellCoord::new(column as u32, row as u32);
                draws.push(layout.block(cell, palette.shadow));
            }
        }
    }

    draws
}

/// Paints rectangles onto a pixel grid the size of the canvas.
///
/// Draws are applied in order, so later rectangles cover earlier ones. Edges
/// are rounded to whole pixels and anything outside the canvas is clipped.
#[must_use]
pub fn rasterize(draws: &[TileDraw], layout: &CanvasLayout, background: Color) -> Grid<Color> {
    let width = layout.width().round() as u32;
    let height = layout.height().round() as u32;
    let mut canvas = Grid::new(width, height, background);
    let limit = Vec2::new(width as f32, height as f32);

    for draw in draws {
        let start = draw.position.round().clamp(Vec2::ZERO, limit);
        let end = (draw.position + draw.size).round().clamp(Vec2::ZERO, limit);
        let size = end - start;
        if size.x < 1.0 || size.y < 1.0 {
            continue;
        }
        canvas.fill(
            draw.color,
            CellRect::from_origin_and_size(
                CellCoord::new(start.x as u32, start.y as u32),
                CellRectSize::new(size.x as u32, size.y as u32),
            ),
        );
    }

    canvas
}

/// Renders a scene as text, one line per viewport row inside a box frame.
///
/// `@` marks the player, `#` walls, `E` the exit, `.` floor and a space fog.
#[must_use]
pub fn text_frame(scene: &Scene) -> String {
    let width = scene.terrain.width() as usize;
    let edge = format!("+{}+", "-".repeat(width));
    let mut frame = String::with_capacity((width + 3) * (scene.terrain.height() as usize + 2));
    frame.push_str(&edge);
    frame.push('\n');

    for (row, (terrain, shades)) in scene.terrain.rows().zip(scene.shades.rows()).enumerate() {
        frame.push('|');
        for (column, (terrain, shade)) in terrain.iter().zip(shades).enumerate() {
            let cell = CellCoord::new(column as u32, row as u32);
            frame.push(glyph(cell == scene.player, *terrain, *shade));
        }
        frame.push_str("|\n");
    }

    frame.push_str(&edge);
    frame
}

fn glyph(player: bool, terrain: Terrain, shade: Shade) -> char {
    if player {
        return '@';
    }
    if shade == Shade::Shadow {
        return ' ';
    }
    match terrain {
        Terrain::Floor | Terrain::FloorAccent => '.',
        Terrain::Wall | Terrain::Border => '#',
        Terrain::Exit => 'E',
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown above the frame.
    pub title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
    /// Free-form status lines shown below the frame.
    pub caption: String,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T, C>(title: T, scene: Scene, caption: C) -> Self
    where
        T: Into<String>,
        C: Into<String>,
    {
        Self {
            title: title.into(),
            scene,
            caption: caption.into(),
        }
    }
}

/// Rendering backend capable of presenting Fog Maze scenes.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Block size must be a positive, finite pixel length.
    InvalidBlockSize {
        /// Provided block size that failed validation.
        block_size: f32,
    },
    /// Terrain and fog layers must cover the same viewport.
    MismatchedLayers {
        /// Size of the terrain layer.
        terrain: CellRectSize,
        /// Size of the fog layer.
        shades: CellRectSize,
    },
    /// The player must be drawn inside the viewport.
    PlayerOutsideViewport {
        /// Rejected player cell.
        player: CellCoord,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBlockSize { block_size } => {
                write!(f, "block size must be positive (received {block_size})")
            }
            Self::MismatchedLayers { terrain, shades } => write!(
                f,
                "terrain layer is {}x{} but fog layer is {}x{}",
                terrain.width(),
                terrain.height(),
                shades.width(),
                shades.height()
            ),
            Self::PlayerOutsideViewport { player } => write!(
                f,
                "player at column {} row {} lies outside the viewport",
                player.column(),
                player.row()
            ),
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        let terrain = Grid::from_rows(vec![
            vec![Terrain::Border, Terrain::Border, Terrain::Border],
            vec![Terrain::Border, Terrain::Floor, Terrain::Wall],
            vec![Terrain::Border, Terrain::FloorAccent, Terrain::Exit],
        ])
        .expect("rectangular terrain");
        let shades = Grid::from_rows(vec![
            vec![Shade::Shadow, Shade::Lit, Shade::Shadow],
            vec![Shade::Lit, Shade::Lit, Shade::Lit],
            vec![Shade::Shadow, Shade::Lit, Shade::Shadow],
        ])
        .expect("rectangular fog");
        Scene::new(terrain, shades, CellCoord::new(1, 1), PlayMode::Game).expect("valid scene")
    }

    #[test]
    fn default_layout_matches_the_classic_canvas() {
        let layout = CanvasLayout::for_viewport(&ViewportConfig::default());

        assert_eq!((layout.width(), layout.height()), (210.0, 210.0));
        assert_eq!(layout.cell_origin(CellCoord::new(0, 0)), Vec2::new(10.0, 10.0));
        assert_eq!(
            layout.cell_origin(CellCoord::new(18, 9)),
            Vec2::new(190.0, 100.0)
        );
    }

    #[test]
    fn layout_rejects_non_positive_block_sizes() {
        let error = CanvasLayout::new(CellRectSize::new(3, 3), 0.0, 1)
            .expect_err("zero block size must be rejected");

        assert!(matches!(
            error,
            RenderingError::InvalidBlockSize { block_size } if block_size == 0.0
        ));
    }

    #[test]
    fn scene_rejects_layers_of_different_sizes() {
        let terrain = Grid::new(3, 3, Terrain::Floor);
        let shades = Grid::new(3, 2, Shade::Lit);

        let error = Scene::new(terrain, shades, CellCoord::new(1, 1), PlayMode::Game)
            .expect_err("mismatched layers must be rejected");

        assert!(matches!(error, RenderingError::MismatchedLayers { .. }));
    }

    #[test]
    fn frame_draws_terrain_player_frame_then_fog() {
        let layout = CanvasLayout::new(CellRectSize::new(3, 3), 10.0, 1).expect("valid layout");
        let palette = Palette::default();

        let draws = compose_frame(&scene(), &layout, &palette);

        assert_eq!(draws.len(), 9 + 1 + 4 + 4);
        assert_eq!(draws[4].color, palette.floor);
        assert_eq!(draws[5].color, palette.wall);
        assert_eq!(draws[8].color, palette.exit);
        assert_eq!(
            draws[9],
            TileDraw::new(Vec2::new(20.0, 20.0), Vec2::splat(10.0), palette.player)
        );
        assert!(draws[10..14].iter().all(|draw| draw.color == palette.frame));
        assert_eq!(draws[13].position, Vec2::new(40.0, 0.0));
        assert!(draws[14..].iter().all(|draw| draw.color == palette.shadow));
        assert_eq!(draws[14].position, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn byte_channels_survive_the_float_conversion() {
        assert_eq!(Color::from_rgb_u8(128, 0, 128).to_rgb_u8(), [128, 0, 128]);
        assert_eq!(Color::new(1.5, -0.2, 0.5, 0.0).to_rgb_u8(), [255, 0, 128]);
    }

    #[test]
    fn rasterized_frame_shows_fog_over_terrain() {
        let layout = CanvasLayout::new(CellRectSize::new(3, 3), 1.0, 1).expect("valid layout");
        let palette = Palette::default();

        let draws = compose_frame(&scene(), &layout, &palette);

        let pixels = rasterize(&draws, &layout, palette.shadow);

        assert_eq!(pixels.size(), CellRectSize::new(5, 5));
        let at = |column, row| *pixels.get(CellCoord::new(column, row)).expect("inside canvas");
        assert_eq!(at(0, 0), palette.frame);
        assert_eq!(at(4, 2), palette.frame);
        assert_eq!(at(2, 2), palette.player);
        assert_eq!(at(2, 1), palette.wall);
        assert_eq!(at(2, 3), palette.floor_accent);
        assert_eq!(at(3, 2), palette.wall);
        assert_eq!(at(1, 1), palette.shadow);
        assert_eq!(at(3, 3), palette.shadow);
    }

    #[test]
    fn rasterize_clips_rectangles_to_the_canvas() {
        let layout = CanvasLayout::new(CellRectSize::new(1, 1), 2.0, 0).expect("valid layout");
        let background = Color::from_rgb_u8(0, 0, 0);
        let red = Color::from_rgb_u8(255, 0, 0);
        let draws = [
            TileDraw::new(Vec2::new(-3.0, 1.0), Vec2::new(4.0, 5.0), red),
            TileDraw::new(Vec2::new(5.0, 5.0), Vec2::splat(2.0), background),
        ];

        let pixels = rasterize(&draws, &layout, background);

        assert_eq!(pixels.cells(), &[background, background, red, background]);
    }

    #[test]
    fn text_frame_hides_fogged_cells() {
        assert_eq!(
            text_frame(&scene()),
            "+---+\n| # |\n|#@#|\n| . |\n+---+"
        );
    }
}
