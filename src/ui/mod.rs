pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, section, success, warn};
pub use table::{customers_table, orders_table, stats_table};
pub use theme::{theme, Theme, Tone};
