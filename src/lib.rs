//! Mesa
//!
//! Mesa is the client-side ordering core of a restaurant menu: cart rules,
//! checkout validation, the ordering flow, and the application state reducer.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod flow;
pub mod ids;
pub mod orders;
pub mod prelude;
pub mod prices;
pub mod state;
