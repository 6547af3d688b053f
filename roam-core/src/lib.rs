pub mod booking;
pub mod executor;
pub mod itinerary;
pub mod payment;
pub mod plan;
pub mod reconcile;
pub mod repository;
pub mod source;

pub use booking::{Booking, BookingStatus, BookingType};
pub use executor::{BookingConfirmation, BookingError, BookingExecutor};
pub use itinerary::{Activity, DayPlan, HotelOption, Itinerary, Lodging, Transport};
pub use payment::{PaymentErrorKind, PaymentProcessor, PaymentResult, TokenClass};
pub use plan::{Plan, PlanStatus};
pub use repository::{BookingFilter, PlanStore, StoreError};
pub use source::{ItineraryRequest, ItinerarySource, PlannerError, TravelType};
