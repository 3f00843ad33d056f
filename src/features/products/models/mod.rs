mod product;

pub use product::{NewProduct, PricePoint, Product};
