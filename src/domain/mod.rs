//! Value types shared by every layer of the crate.
//!
//! Everything here is immutable: arithmetic and conversions return new
//! values.  [`Fraction`] is the numeric foundation; currencies, amounts
//! and prices tag it with units so that amounts of different tokens cannot
//! be mixed by accident.

mod chain_id;
mod currency;
mod currency_amount;
mod fee_amount;
mod fraction;
mod percent;
mod price;
mod rounding;
mod tick;
mod token;
mod token_address;
mod trade_type;

pub use chain_id::ChainId;
pub use currency::{Currency, NativeCurrency};
pub use currency_amount::CurrencyAmount;
pub use fee_amount::FeeAmount;
pub use fraction::Fraction;
pub use percent::Percent;
pub use price::Price;
pub use rounding::Rounding;
pub use tick::Tick;
pub use token::Token;
pub use token_address::{TokenAddress, ADDRESS_LENGTH};
pub use trade_type::TradeType;
