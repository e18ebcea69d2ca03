mod amount;
mod inst_id;
mod inst_type;

pub use amount::{PositiveAmount, WaitMinutes};
pub use inst_id::InstId;
pub use inst_type::InstType;
