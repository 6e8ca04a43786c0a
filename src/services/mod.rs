//! External service clients: geocoder, weather provider, places search,
//! and the client-side forwarder consumer.

pub mod forwarder;
pub mod geocode;
pub mod places;
pub mod weather;
