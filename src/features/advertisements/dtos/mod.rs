mod advertisement_dto;

pub use advertisement_dto::{
    AdvertisementResponseDto, CreateAdvertisementDto, UpdateAdvertisementDto,
};
