//! Pong Wars screen
//!
//! Every cell and both balls are created once with the screen; steps and
//! resets only restyle or move them.

use prospector_display::{
    Align, Color, Font, Style, Surface, SurfaceError, SurfaceExt, UiEvent, WidgetId, WidgetKind,
};

use super::{label_aligned, Ctx, Owned};
use crate::format;
use crate::pong::engine::{cell_origin, BALL_COUNT, BALL_RADIUS, CELL_SIZE};
use crate::pong::engine::{ARENA_H, ARENA_W, ARENA_X, ARENA_Y};
use crate::pong::{Engine, CELL_COUNT};

pub const RETURN_HINT: &str = "\u{F054} swipe to return";

const SCORE_X: [i16; 2] = [20, 225];

pub struct PongWarsScreen {
    owned: Owned<8>,
    arena: WidgetId,
    cells: [WidgetId; CELL_COUNT],
    balls: [WidgetId; BALL_COUNT],
    scores: [WidgetId; 2],
    engine: Engine,
}

impl PongWarsScreen {
    pub fn create<S: Surface + ?Sized>(ctx: &mut Ctx<'_, S>, seed: u32) -> Result<Self, SurfaceError> {
        let s = &mut *ctx.surface;
        let mut owned = Owned::new();
        let engine = Engine::new(seed);

        owned.add(label_aligned(s, "Pong Wars", Font::Montserrat16, Color::WHITE, Align::TopMid, 0, 6)?)?;

        let mut scores = [WidgetId::new(0, 0); 2];
        for (team, slot) in scores.iter_mut().enumerate() {
            let pill = owned.add(s.create(WidgetKind::Label, None)?)?;
            s.set_position(pill, SCORE_X[team], 6)?;
            s.styles(pill, &[Style::Font(Font::Montserrat12), Style::BgOpacity(100), Style::Radius(6)])?;
            *slot = pill;
        }

        let arena = owned.add(s.create(WidgetKind::Container, None)?)?;
        s.set_position(arena, ARENA_X, ARENA_Y)?;
        s.set_size(arena, ARENA_W as u16, ARENA_H as u16)?;
        s.styles(
            arena,
            &[
                Style::Radius(8),
                Style::BorderColor(Color::hex(0x404060)),
                Style::BorderWidth(2),
            ],
        )?;
        s.set_clickable(arena, true)?;

        let mut cells = [arena; CELL_COUNT];
        for (index, slot) in cells.iter_mut().enumerate() {
            let cell = s.create(WidgetKind::Container, Some(arena))?;
            let (x, y) = cell_origin(index);
            s.set_position(cell, x, y)?;
            s.set_size(cell, CELL_SIZE as u16, CELL_SIZE as u16)?;
            s.styles(cell, &[Style::BgOpacity(100), Style::Radius(0), Style::BorderWidth(0)])?;
            *slot = cell;
        }

        let mut balls = [arena; BALL_COUNT];
        for slot in balls.iter_mut() {
            let ball = s.create(WidgetKind::Container, Some(arena))?;
            let size = (BALL_RADIUS * 2) as u16;
            s.set_size(ball, size, size)?;
            s.styles(
                ball,
                &[
                    Style::BgOpacity(100),
                    Style::Radius(BALL_RADIUS as u8),
                    Style::BorderColor(Color::WHITE),
                    Style::BorderWidth(2),
                ],
            )?;
            *slot = ball;
        }

        owned.add(label_aligned(s, RETURN_HINT, Font::Montserrat12, Color::hex(0x606080), Align::BottomMid, 0, -4)?)?;

        let screen = Self {
            owned,
            arena,
            cells,
            balls,
            scores,
            engine,
        };
        screen.repaint(ctx.surface);
        Ok(screen)
    }

    /// Redraw every cell, ball and score from the engine
    fn repaint<S: Surface + ?Sized>(&self, surface: &mut S) {
        let palette = self.engine.palette();
        for (index, cell) in self.cells.iter().enumerate() {
            let _ = surface.set_style(*cell, Style::BgColor(palette.cell(self.engine.cell(index))));
        }
        for (team, pill) in self.scores.iter().enumerate() {
            let _ = surface.set_style(*pill, Style::TextColor(palette.ball(team as u8)));
            let _ = surface.set_style(*pill, Style::BgColor(palette.cell(team as u8)));
        }
        for (widget, ball) in self.balls.iter().zip(self.engine.balls().iter()) {
            let _ = surface.set_style(*widget, Style::BgColor(palette.ball(ball.team)));
        }
        self.move_balls(surface);
        self.show_scores(surface);
        // Balls draw above the cells
        for ball in self.balls.iter() {
            let _ = surface.bring_to_front(*ball);
        }
    }

    fn move_balls<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (widget, ball) in self.balls.iter().zip(self.engine.balls().iter()) {
            let (x, y) = ball.origin();
            let _ = surface.set_position(*widget, x, y);
        }
    }

    fn show_scores<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (pill, score) in self.scores.iter().zip(self.engine.scores()) {
            let _ = surface.set_text(*pill, &format::number(score as u32));
        }
    }

    /// Advance the simulation one fixed step
    pub fn step<S: Surface + ?Sized>(&mut self, ctx: &mut Ctx<'_, S>) {
        let report = self.engine.step();
        let palette = self.engine.palette();
        for index in report.converted {
            let color = palette.cell(self.engine.cell(index));
            let _ = ctx.surface.set_style(self.cells[index], Style::BgColor(color));
        }
        self.move_balls(ctx.surface);
        if report.scores_due {
            self.show_scores(ctx.surface);
        }
    }

    /// New round on the same widgets
    pub fn reset<S: Surface + ?Sized>(&mut self, ctx: &mut Ctx<'_, S>, seed: u32) {
        self.engine.reset(seed);
        self.repaint(ctx.surface);
    }

    /// Whether `event` is a tap on the arena
    pub fn is_arena_tap(&self, event: &UiEvent) -> bool {
        match event {
            UiEvent::Clicked(target) => *target == self.arena || self.cells.contains(target) || self.balls.contains(target),
            _ => false,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn destroy<S: Surface + ?Sized>(self, ctx: &mut Ctx<'_, S>) {
        ctx.anim.cancel_all(ctx.surface);
        let mut owned = self.owned;
        owned.delete_all(ctx.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Animator;
    use prospector_display::Scene;

    type TestScene = Scene<128>;

    fn build(scene: &mut TestScene, anim: &mut Animator, seed: u32) -> PongWarsScreen {
        PongWarsScreen::create(&mut Ctx::new(scene, anim, 0), seed).unwrap()
    }

    #[test]
    fn test_widgets_allocated_once() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let mut screen = build(&mut scene, &mut anim, 7);
        // Title, two pills, arena, cells, balls, hint
        let expected = 5 + CELL_COUNT + BALL_COUNT;
        assert_eq!(scene.widget_count(), expected);

        let mut ctx = Ctx::new(&mut scene, &mut anim, 0);
        for _ in 0..200 {
            screen.step(&mut ctx);
        }
        screen.reset(&mut ctx, 99);
        assert_eq!(ctx.surface.widget_count(), expected);
    }

    #[test]
    fn test_cells_follow_engine() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let mut screen = build(&mut scene, &mut anim, 3);
        {
            let mut ctx = Ctx::new(&mut scene, &mut anim, 0);
            for _ in 0..300 {
                screen.step(&mut ctx);
            }
        }
        let palette = screen.engine().palette();
        for (index, cell) in screen.cells.iter().enumerate() {
            let node = scene.node(*cell).unwrap();
            assert_eq!(node.bg_color, palette.cell(screen.engine().cell(index)));
            assert_eq!(node.parent, Some(screen.arena));
        }
        for (widget, ball) in screen.balls.iter().zip(screen.engine().balls()) {
            let node = scene.node(*widget).unwrap();
            assert_eq!((node.x, node.y), ball.origin());
        }
    }

    #[test]
    fn test_scores_shown_every_tenth_step() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let mut screen = build(&mut scene, &mut anim, 11);
        assert_eq!(scene.text(screen.scores[0]), Some("54"));
        assert_eq!(scene.text(screen.scores[1]), Some("54"));

        let mut ctx = Ctx::new(&mut scene, &mut anim, 0);
        for _ in 0..10 {
            screen.step(&mut ctx);
        }
        let [left, right] = screen.engine().scores();
        assert_eq!(left + right, CELL_COUNT as u16);
        assert_eq!(ctx.surface.text(screen.scores[0]), Some(format::number(left as u32).as_str()));
    }

    #[test]
    fn test_arena_tap() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let screen = build(&mut scene, &mut anim, 1);
        assert!(screen.is_arena_tap(&UiEvent::Clicked(screen.arena)));
        assert!(screen.is_arena_tap(&UiEvent::Clicked(screen.cells[40])));
        assert!(!screen.is_arena_tap(&UiEvent::Clicked(screen.scores[0])));
    }

    #[test]
    fn test_destroy() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let screen = build(&mut scene, &mut anim, 1);
        screen.destroy(&mut Ctx::new(&mut scene, &mut anim, 0));
        assert_eq!(scene.widget_count(), 0);
    }
}
