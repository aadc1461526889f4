// CLI subcommand handlers.
//
// `network` resolves and loads the area network shared by every command; the
// other modules each handle one subcommand.

pub mod areas;
pub mod distances;
pub mod nearest;
pub mod network;
pub mod rank;
