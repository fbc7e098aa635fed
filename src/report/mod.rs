pub mod output;

pub use output::{render_cost_table, render_delivery_table, render_json, save_to_csv, write_csv};
