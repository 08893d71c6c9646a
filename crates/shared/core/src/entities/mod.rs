mod side;

pub use side::OrderSide;
