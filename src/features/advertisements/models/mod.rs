mod advertisement;

pub use advertisement::{Advertisement, NewAdvertisement};
