//! Translation of typed tokens into player intents.

use anyhow::{Context, Result};
use fog_maze_core::Direction;

/// Intent typed by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Step one tile.
    Move(Direction),
    /// Switch between game and free-roam mode.
    ToggleMode,
    /// Leave the game.
    Quit,
}

/// Maps a single token to an input. Arrow names, `wasd` and `hjkl` all move.
pub(crate) fn parse_token(token: &str) -> Option<Input> {
    let input = match token.to_ascii_lowercase().as_str() {
        "w" | "k" | "up" => Input::Move(Direction::Up),
        "s" | "j" | "down" => Input::Move(Direction::Down),
        "a" | "h" | "left" => Input::Move(Direction::Left),
        "d" | "l" | "right" => Input::Move(Direction::Right),
        "m" | "mode" => Input::ToggleMode,
        "q" | "quit" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

/// Parses a script of tokens separated by whitespace or commas.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Input>> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            parse_token(token)
                .with_context(|| format!("unknown move `{token}` at position {}", index + 1))
        })
        .collect()
}
