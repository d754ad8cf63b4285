use tui_match3::core::{Grid, ScriptedTiles, Session};
use tui_match3::engine::{Game, Pacing};
use tui_match3::term::{AnchorY, FrameBuffer, GameView, Viewport};
use tui_match3::types::GameAction;

fn fruit_game() -> Game<ScriptedTiles> {
    let grid = Grid::parse(&["🍉🍋🍋", "🍋🥝🍇", "🍊🍌🥥"]).unwrap();
    let session = Session::from_grid(grid, ScriptedTiles::from_symbols("🍒🍑🍐")).unwrap();
    Game::new(session, Pacing::Immediate, 1)
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap();
            if !cell.is_wide_tail() {
                all.push(cell.ch);
            }
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = fruit_game().snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    // With cell_w=2 and cell_h=1:
    // board pixels = 3*2 by 3*1 => 6x3
    // plus border => 8x5
    let fb = view.render(&snap, Viewport::new(8, 6));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(7, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 4).unwrap().ch, '└');
    assert_eq!(fb.get(7, 4).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_tiles_two_columns_wide() {
    let snap = fruit_game().snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(8, 6));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    assert_eq!(fb.get(1, 1).unwrap().ch, '🍉');
    assert!(fb.get(2, 1).unwrap().is_wide_tail());
    assert_eq!(fb.get(3, 1).unwrap().ch, '🍋');
    assert_eq!(fb.get(5, 3).unwrap().ch, '🥥');
}

#[test]
fn term_view_highlights_cursor_and_selection() {
    let mut game = fruit_game();
    game.apply_action(GameAction::SelectOrSwap);
    game.apply_action(GameAction::CursorRight);

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&game.snapshot(), Viewport::new(8, 6));

    let selected = fb.get(1, 1).unwrap().style.bg;
    let cursor = fb.get(3, 1).unwrap().style.bg;
    let plain = fb.get(5, 1).unwrap().style.bg;
    assert_ne!(selected, plain);
    assert_ne!(cursor, plain);
    assert_ne!(selected, cursor);
}

#[test]
fn term_view_highlights_hints() {
    let mut game = fruit_game();
    game.apply_action(GameAction::CursorDown);
    game.apply_action(GameAction::CursorRight);
    game.apply_action(GameAction::Hint);

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&game.snapshot(), Viewport::new(8, 6));

    // The only move is (0,0) <-> (1,0).
    let hinted = fb.get(1, 1).unwrap().style.bg;
    let plain = fb.get(5, 3).unwrap().style.bg;
    assert_ne!(hinted, plain);
    assert_eq!(fb.get(1, 2).unwrap().style.bg, hinted);
}

#[test]
fn term_view_draws_message_line() {
    let mut game = fruit_game();
    game.apply_action(GameAction::SelectOrSwap);

    let all = screen_text(&GameView::default().render(&game.snapshot(), Viewport::new(60, 12)));
    assert!(all.contains("Selection made!"));
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut game = fruit_game();
    game.apply_action(GameAction::SelectOrSwap);
    game.apply_action(GameAction::CursorDown);
    game.apply_action(GameAction::SelectOrSwap);
    assert_eq!(game.session().score().total().removed, 3);

    let view = GameView::default();
    // Wider than the 8x5 board frame to allow a panel.
    let fb = view.render(&game.snapshot(), Viewport::new(60, 12));
    let all = screen_text(&fb);

    assert!(all.contains("SCORE"));
    assert!(all.contains("MOVES"));
    // Frame starts at (26,3); the panel two columns right of it.
    assert_eq!(fb.get(36, 3).unwrap().ch, 'S');
    assert_eq!(fb.get(36, 4).unwrap().ch, '3');
    // The refill left nothing to swap.
    assert!(all.contains("NO MOVES"));
}

#[test]
fn term_view_shows_no_moves_overlay() {
    let grid = Grid::parse(&["abcde", "bcdea", "cdeab"]).unwrap();
    let session = Session::from_grid(grid, ScriptedTiles::from_symbols("x")).unwrap();
    let game = Game::new(session, Pacing::Immediate, 1);
    let snap = game.snapshot();
    assert!(snap.no_moves());

    let all = screen_text(&GameView::default().render(&snap, Viewport::new(40, 10)));
    assert!(all.contains("NO MOVES"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = fruit_game().snapshot();
    let view = GameView::default();

    // Frame is 5 rows tall plus one message row.
    let fb = view.render(&snap, Viewport::new(8, 16));

    // start_y = (16 - 6) / 2 = 5 => top-left corner at (0,5).
    assert_eq!(fb.get(0, 5).unwrap().ch, '┌');
}

#[test]
fn term_view_clips_cells_wider_than_the_screen() {
    let snap = fruit_game().snapshot();
    // Three 40k-column cells overflow u16; the view saturates and clips.
    let view = GameView::new(40_000, 1).with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(20, 6));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(1, 1).unwrap().ch, '🍉');
    assert_eq!(fb.get(0, 4).unwrap().ch, '└');
}
