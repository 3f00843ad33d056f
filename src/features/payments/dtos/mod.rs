mod payment_dto;

pub use payment_dto::{
    ConfirmPaymentDto, CreatePaymentIntentDto, PaymentIntentResponseDto, PaymentResponseDto,
};
