//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    CountryAddRequest, PersonAddRequest, PersonUpdateRequest, PersonsIndexQuery,
    PERSON_REQUEST_FIELDS,
};
pub use response::{
    search_field_options, CountryResponse, PersonEditResponse, PersonFormResponse,
    PersonResponse, PersonsIndexResponse, SearchFieldOption, UploadCountriesResponse,
};
