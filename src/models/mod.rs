mod member;
mod order;

pub use member::{Address, Member, NewMember};
pub use order::{Order, OrderStatus};
