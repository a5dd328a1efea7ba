//! Workflow step listing supported boards.
use crate::boards::supported_boards;
use crate::cli::BoardsArgs;
use anyhow::Result;

pub fn run_boards(args: &BoardsArgs) -> Result<()> {
    for name in supported_boards(args.filter.as_deref())? {
        println!("{name}");
    }
    Ok(())
}
