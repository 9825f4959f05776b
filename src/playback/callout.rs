//! Code snippet callouts

use std::io::{self, Write};
use std::time::Duration;

use crate::terminal::Screen;
use crate::time::Clock;

/// Fixed pause after a snippet, standing in for its execution
pub const EXECUTION_PAUSE: Duration = Duration::from_secs(1);

/// Render `code` as a snippet block, then pause for [`EXECUTION_PAUSE`].
///
/// The pause does not depend on the snippet's length.
pub fn show_code<C, W>(clock: &C, screen: &mut Screen<W>, code: &str) -> io::Result<()>
where
    C: Clock + ?Sized,
    W: Write,
{
    screen.code_block(code)?;
    clock.sleep(EXECUTION_PAUSE);
    Ok(())
}
