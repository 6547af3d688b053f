pub mod calendar;
pub mod search;

pub use calendar::{CalendarEvent, TravelWindow, UserCalendar};
pub use search::{
    destination_info, search_activities, search_flights, search_hotels, ActivityListing,
    DestinationInfo, FlightListing, HotelListing,
};
