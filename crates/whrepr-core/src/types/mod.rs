mod numeric;

pub use numeric::Numeric;
