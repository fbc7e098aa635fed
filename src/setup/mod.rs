pub mod input;
pub mod input_types;

pub use input::{parse_cost_input, parse_delivery_input, read_lines};
pub use input_types::{CostInput, DeliveryInput, Header};
