//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{ButtonState, GameSnapshot, InfoPanel};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockTag, NuggetClass, SceneId, SPEED_BAR_STATES};

const BOARD_BG: Rgb = Rgb::new(22, 40, 24);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BITE_RED: Rgb = Rgb::new(230, 40, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Outer rectangle of the bordered board, in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the snake game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 keeps board cells roughly square in most terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let frame = self.frame(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let bg = CellStyle::new(Rgb::new(60, 90, 60), BOARD_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', bg);
        self.draw_border(fb, frame, border);

        match snap.scene {
            SceneId::Play => {
                self.draw_nuggets(fb, snap, frame);
                self.draw_snake(fb, snap, frame);
                self.draw_popups(fb, snap, frame);
                self.draw_side_panel(fb, snap, viewport, frame);
                if snap.game_over {
                    self.draw_game_over(fb, snap, frame);
                }
            }
            SceneId::Menu => self.draw_menu(fb, snap, frame),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn frame(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let w = snap.board_width.saturating_mul(self.cell_w).saturating_add(2);
        let h = snap.board_height.saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame, style: CellStyle) {
        if f.w < 2 || f.h < 2 {
            return;
        }

        fb.put_char(f.x, f.y, '╔', style);
        fb.put_char(f.x + f.w - 1, f.y, '╗', style);
        fb.put_char(f.x, f.y + f.h - 1, '╚', style);
        fb.put_char(f.x + f.w - 1, f.y + f.h - 1, '╝', style);

        for dx in 1..f.w - 1 {
            fb.put_char(f.x + dx, f.y, '═', style);
            fb.put_char(f.x + dx, f.y + f.h - 1, '═', style);
        }
        for dy in 1..f.h - 1 {
            fb.put_char(f.x, f.y + dy, '║', style);
            fb.put_char(f.x + f.w - 1, f.y + dy, '║', style);
        }
    }

    /// Terminal position of the top-left corner of a board cell.
    fn cell_origin(&self, f: Frame, row: i16, col: i16) -> Option<(u16, u16)> {
        let row = u16::try_from(row).ok()?;
        let col = u16::try_from(col).ok()?;
        Some((
            f.x + 1 + col.checked_mul(self.cell_w)?,
            f.y + 1 + row.checked_mul(self.cell_h)?,
        ))
    }

    fn fill_board_cell(&self, fb: &mut FrameBuffer, f: Frame, row: i16, col: i16, pair: [char; 2], style: CellStyle) {
        let Some((px, py)) = self.cell_origin(f, row, col) else {
            return;
        };
        for dy in 0..self.cell_h {
            for dx in 0..self.cell_w {
                let ch = if dx == 0 { pair[0] } else { pair[1] };
                fb.put_char(px + dx, py + dy, ch, style);
            }
        }
    }

    fn draw_nuggets(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, f: Frame) {
        for nugget in snap.nuggets.iter() {
            let style = CellStyle::new(nugget_color(nugget.class), BOARD_BG).bold();
            self.fill_board_cell(fb, f, nugget.cell.row, nugget.cell.col, ['◆', ' '], style);
        }
    }

    fn draw_snake(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, f: Frame) {
        let hero = Rgb::from_tuple(snap.hero.color());
        // Tail first so the head wins if anything overlaps after a bite.
        for seg in snap.segments.iter().rev() {
            let fg = match seg.tag {
                BlockTag::Bitten | BlockTag::Eaten => BITE_RED,
                _ => hero,
            };
            let mut style = CellStyle::new(fg, BOARD_BG);
            if matches!(
                seg.tag,
                BlockTag::HeadTailNorth
                    | BlockTag::HeadTailSouth
                    | BlockTag::HeadTailEast
                    | BlockTag::HeadTailWest
            ) {
                style = style.bold();
            }
            self.fill_board_cell(fb, f, seg.cell.row, seg.cell.col, tag_glyphs(seg.tag), style);
        }
    }

    fn draw_popups(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, f: Frame) {
        let style = CellStyle::new(Rgb::new(255, 255, 160), BOARD_BG).bold();
        let right = f.x + f.w - 1;
        for popup in snap.popups.iter() {
            let row = if popup.cell.row > 0 { popup.cell.row - 1 } else { popup.cell.row };
            let Some((px, py)) = self.cell_origin(f, row, popup.cell.col) else {
                continue;
            };
            // Shift left so the text stays inside the border.
            let w = 1 + digit_count(popup.score);
            let px = px.min(right.saturating_sub(w));
            fb.put_char(px, py, '+', style);
            fb.put_u32(px + 1, py, popup.score, style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = f.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        fb.put_char(panel_x, y, '+', value);
        let x = fb.put_u32(panel_x + 1, y, snap.speed_percent, value);
        fb.put_char(x, y, '%', value);
        y = y.saturating_add(1);
        self.draw_speed_bar(fb, panel_x, y, snap.speed_bar_level);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NUGGETS", label);
        y = y.saturating_add(1);
        for (i, class) in NuggetClass::ALL.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            let color = CellStyle::new(nugget_color(*class), PANEL_BG).bold();
            fb.put_char(panel_x, y, '◆', color);
            let x = fb.put_str(panel_x + 2, y, class.name(), value);
            if panel_w >= 20 {
                fb.put_char(panel_x + 11, y, 'x', dim);
                fb.put_u32(panel_x + 12, y, snap.eaten[i], value);
            } else {
                fb.put_char(x + 1, y, 'x', dim);
                fb.put_u32(x + 2, y, snap.eaten[i], value);
            }
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "HERO", label);
        y = y.saturating_add(1);
        let hero = CellStyle::new(Rgb::from_tuple(snap.hero.color()), PANEL_BG).bold();
        fb.put_str(panel_x, y, snap.hero.name(), hero);
    }

    fn draw_speed_bar(&self, fb: &mut FrameBuffer, x: u16, y: u16, level: u32) {
        let on = CellStyle::new(Rgb::new(250, 180, 40), PANEL_BG);
        let off = CellStyle::new(Rgb::new(90, 90, 90), PANEL_BG).dim();
        let slots = SPEED_BAR_STATES - 1;
        fb.put_char(x, y, '[', off);
        for i in 0..slots {
            let (ch, style) = if i < level { ('█', on) } else { ('·', off) };
            fb.put_char(x + 1 + i as u16, y, ch, style);
        }
        fb.put_char(x + 1 + slots as u16, y, ']', off);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, f: Frame) {
        let mid_y = f.y.saturating_add(f.h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        self.put_centered(fb, f, mid_y, "GAME OVER", style);

        // "SCORE " plus the digits, centred as one run.
        let digits = digit_count(snap.last_score);
        let w = 6 + digits;
        let x = f.x.saturating_add(f.w.saturating_sub(w) / 2);
        let y = mid_y.saturating_add(1);
        let x = fb.put_str(x, y, "SCORE ", style);
        fb.put_u32(x, y, snap.last_score, style);
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, f: Frame) {
        let title = CellStyle::new(Rgb::new(245, 207, 0), BOARD_BG).bold();
        let text = CellStyle::new(Rgb::new(220, 220, 220), BOARD_BG);
        let dim = text.dim();

        let mut y = f.y.saturating_add(3);
        self.put_centered(fb, f, y, "N U G G E T   S N A K E", title);
        y = y.saturating_add(3);

        for button in snap.menu.buttons.iter() {
            let style = match button.state {
                ButtonState::Idle => CellStyle::new(Rgb::new(170, 170, 170), BOARD_BG),
                ButtonState::Hovered => CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(220, 220, 220)).bold(),
                ButtonState::Pressed => CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(200, 60, 40)).bold(),
            };
            // Buttons are a fixed 16 columns wide.
            let bx = f.x.saturating_add(f.w.saturating_sub(16) / 2);
            fb.fill_rect(bx, y, 16, 1, ' ', style);
            let lw = button.label.chars().count() as u16;
            fb.put_str(bx + 16u16.saturating_sub(lw) / 2, y, button.label, style);
            y = y.saturating_add(2);
        }

        let hero = CellStyle::new(Rgb::from_tuple(snap.hero.color()), BOARD_BG).bold();
        self.put_centered(fb, f, y, snap.hero.name(), hero);
        y = y.saturating_add(3);

        let left = f.x.saturating_add(6);
        match snap.menu.panel {
            InfoPanel::Rules => {
                fb.put_str(left, y, "HOW TO PLAY", title);
                fb.put_str(left, y + 2, "Steer with the arrows, WASD or hjkl.", text);
                fb.put_str(left, y + 3, "Eat nuggets to score and grow.", text);
                fb.put_str(left, y + 4, "The board wraps at every edge.", text);
                fb.put_str(left, y + 5, "Bite yourself and the run is over.", text);
            }
            InfoPanel::Scores => {
                fb.put_str(left, y, "NUGGET VALUES", title);
                for (i, class) in NuggetClass::ALL.iter().enumerate() {
                    let row = y + 2 + i as u16;
                    let color = CellStyle::new(nugget_color(*class), BOARD_BG).bold();
                    fb.put_char(left, row, '◆', color);
                    fb.put_str(left + 2, row, class.name(), text);
                    fb.put_u32(left + 12, row, snap.class_scores[i], text);
                }
            }
            InfoPanel::Combos => {
                fb.put_str(left, y, "COMBOS", title);
                let rows = ["3 alike in a row", "6 alike in a row", "Amethyst down to Gold"];
                for (i, (label, bonus)) in rows.iter().zip(snap.combo_bonuses).enumerate() {
                    let row = y + 2 + i as u16;
                    fb.put_str(left, row, label, text);
                    fb.put_char(left + 26, row, 'x', text);
                    fb.put_u32(left + 27, row, bonus, text);
                }
            }
            InfoPanel::Speed => {
                fb.put_str(left, y, "SPEED BONUS", title);
                let x = fb.put_str(left, y + 2, "Eat again within ", text);
                let x = fb.put_u32(x, y + 2, snap.speed_bonus_cooldown_ms / 1000, text);
                fb.put_str(x, y + 2, "s to climb the bar.", text);
                let table = &snap.speed_bonus_table;
                let x = fb.put_str(left, y + 3, "Bonus runs from +", text);
                let x = fb.put_u32(x, y + 3, table[0], text);
                let x = fb.put_str(x, y + 3, "% to +", text);
                let x = fb.put_u32(x, y + 3, table[table.len() - 1], text);
                fb.put_char(x, y + 3, '%', text);
            }
        }

        let bottom = f.y.saturating_add(f.h).saturating_sub(3);
        let x = fb.put_str(left, bottom, "LAST SCORE ", dim);
        fb.put_u32(x, bottom, snap.last_score, text);
    }

    fn put_centered(&self, fb: &mut FrameBuffer, f: Frame, y: u16, s: &str, style: CellStyle) {
        let w = s.chars().count() as u16;
        let x = f.x.saturating_add(f.w.saturating_sub(w) / 2);
        fb.put_str(x, y, s, style);
    }
}

/// Two-column glyph pair for a snake block.
fn tag_glyphs(tag: BlockTag) -> [char; 2] {
    match tag {
        BlockTag::BodyNorthSouth | BlockTag::BodySouthNorth => ['█', '█'],
        BlockTag::BodyWestEast | BlockTag::BodyEastWest => ['▀', '▀'],
        BlockTag::CornerNorthEast
        | BlockTag::CornerNorthWest
        | BlockTag::CornerSouthEast
        | BlockTag::CornerSouthWest => ['▓', '▓'],
        BlockTag::TailHeadNorth | BlockTag::TailHeadSouth => ['▒', '▒'],
        BlockTag::TailHeadEast => [' ', '▒'],
        BlockTag::TailHeadWest => ['▒', ' '],
        // Head glyphs point the way the snake travels, away from its body.
        BlockTag::HeadTailNorth => ['▼', '▼'],
        BlockTag::HeadTailSouth => ['▲', '▲'],
        BlockTag::HeadTailEast => ['◀', '█'],
        BlockTag::HeadTailWest => ['█', '▶'],
        BlockTag::Bitten => ['░', '░'],
        BlockTag::Eaten => ['×', '×'],
    }
}

fn nugget_color(class: NuggetClass) -> Rgb {
    match class {
        NuggetClass::Gold => Rgb::new(250, 200, 40),
        NuggetClass::Silver => Rgb::new(200, 200, 215),
        NuggetClass::Obsidian => Rgb::new(120, 100, 140),
        NuggetClass::Ruby => Rgb::new(220, 40, 70),
        NuggetClass::Jade => Rgb::new(0, 180, 110),
        NuggetClass::Lapis => Rgb::new(60, 110, 220),
        NuggetClass::Amethyst => Rgb::new(170, 110, 220),
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}
