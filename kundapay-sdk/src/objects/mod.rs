pub mod countries;
pub mod methods;
pub mod quote;
pub mod ws;

pub use countries::{Country, Currency};
pub use methods::{PaymentMethod, ReceivingMethod};
pub use quote::{ApiErrorBody, CorridorInfo, DiscountType, QuoteRequest, TransferQuote};
pub use ws::QuoteStreamMessage;
