//! Request-level operations over the storage interface.

mod crud;
mod links;
mod search;
mod validation;
pub use crud::CrudService;
pub use links::{LinkOutcome, PlaceAmenities};
pub use search::{search_dict, PlaceSearch, SearchFilter};
pub use validation::RequestValidator;
