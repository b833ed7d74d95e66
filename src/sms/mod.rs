//! SMS rendering and dispatch.
//!
//! A send goes through four steps, each of which can end it early with a
//! failed [`DeliveryResult`]:
//!
//! 1. resolve the template by ID
//! 2. check every declared variable is supplied, then substitute
//! 3. check the destination looks like a phone number
//! 4. hand the message to the configured [`SmsProvider`], once
//!
//! Failures are values, never errors or panics across this boundary.

mod destination;
mod dispatcher;
mod member;
pub mod provider;
mod types;

pub use destination::is_valid_phone_number;
pub use dispatcher::SmsDispatcher;
pub use member::{MemberContact, MembershipStatus};
pub use provider::{
    create_provider, ProviderCredentials, ProviderError, ProviderKind, ProviderReceipt,
    ProviderResult, SimulationOverrides, SimulationProfile, SmsProvider,
};
pub use types::{DeliveryError, DeliveryErrorKind, DeliveryResult, OutboundMessage};
