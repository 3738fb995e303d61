//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O or external
//! dependencies. Wire formats match the marketplace backend (camelCase).

mod account;
mod catalog;
mod invite;
pub mod result;
pub mod role;
mod session;
mod user;
pub mod validation;
mod warehouse;

pub use account::{AuthGrant, Credentials, Location, LocationForm, SignupForm, SignupRequest};
pub use catalog::{AssignmentForm, NewProduct, Product, ProductForm, SearchQuery, WarehouseItem};
pub use invite::{AppAdminInvite, AppAdminInviteForm, WarehouseAdminInvite, WarehouseAdminInviteForm};
pub use role::{access, Access, Capability, Requirement, View};
pub use session::{Session, SessionState};
pub use user::{User, UserType};
pub use validation::ValidationErrors;
pub use warehouse::{NewWarehouse, WarehouseForm};
