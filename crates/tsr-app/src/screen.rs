// ABOUTME: Terminal size query for the controlling terminal.
// ABOUTME: Falls back to LINES/COLUMNS and finally to 24x80.

const DEFAULT_ROWS: u16 = 24;
const DEFAULT_COLS: u16 = 80;

/// Current terminal size as (rows, cols)
pub fn terminal_size() -> (u16, u16) {
    query_tty()
        .or_else(from_env)
        .unwrap_or((DEFAULT_ROWS, DEFAULT_COLS))
}

#[cfg(unix)]
fn query_tty() -> Option<(u16, u16)> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let ret = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
    if ret != 0 || ws.ws_row == 0 || ws.ws_col == 0 {
        return None;
    }
    Some((ws.ws_row, ws.ws_col))
}

#[cfg(not(unix))]
fn query_tty() -> Option<(u16, u16)> {
    None
}

fn from_env() -> Option<(u16, u16)> {
    let rows: u16 = std::env::var("LINES").ok()?.parse().ok()?;
    let cols: u16 = std::env::var("COLUMNS").ok()?.parse().ok()?;
    (rows > 0 && cols > 0).then_some((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_never_zero() {
        let (rows, cols) = terminal_size();
        assert!(rows > 0);
        assert!(cols > 0);
    }
}
