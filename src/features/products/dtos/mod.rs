mod product_dto;

pub use product_dto::{
    ApprovedProductsQuery, CreateProductDto, PricePointDto, ProductDetailDto, ProductResponseDto,
    ProductSort, UpdateProductDto,
};
