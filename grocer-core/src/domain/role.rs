//! Role capabilities and view routing
//!
//! Each role owns a fixed capability set and each view declares what it
//! requires. Rendering code asks `access()` instead of branching on roles.

use std::fmt;

use serde::Serialize;

use super::session::Session;
use super::user::UserType;

/// Actions a role may be allowed to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    SearchProducts,
    InviteAppAdmin,
    InviteWarehouseAdmin,
    CreateWarehouse,
    RegisterProduct,
    AssignProduct,
}

impl Capability {
    /// Dashboard card title
    pub fn title(&self) -> &'static str {
        match self {
            Capability::SearchProducts => "Search Products",
            Capability::InviteAppAdmin => "Invite App Admin",
            Capability::InviteWarehouseAdmin => "Invite Warehouse Admin",
            Capability::CreateWarehouse => "Create Warehouse",
            Capability::RegisterProduct => "Register Product",
            Capability::AssignProduct => "Assign Product",
        }
    }

    /// Dashboard card description
    pub fn description(&self) -> &'static str {
        match self {
            Capability::SearchProducts => "Browse and search for products",
            Capability::InviteAppAdmin => "Invite application administrators",
            Capability::InviteWarehouseAdmin => "Invite warehouse administrators",
            Capability::CreateWarehouse => "Set up new warehouse locations",
            Capability::RegisterProduct => "Add new products to inventory",
            Capability::AssignProduct => "Assign products to warehouses",
        }
    }

    /// The view that exercises this capability
    pub fn view(&self) -> View {
        match self {
            Capability::SearchProducts => View::SearchProducts,
            Capability::InviteAppAdmin => View::InviteAppAdmin,
            Capability::InviteWarehouseAdmin => View::InviteWarehouseAdmin,
            Capability::CreateWarehouse => View::CreateWarehouse,
            Capability::RegisterProduct => View::RegisterProduct,
            Capability::AssignProduct => View::AssignProduct,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            Capability::SearchProducts => "search products",
            Capability::InviteAppAdmin => "invite app admins",
            Capability::InviteWarehouseAdmin => "invite warehouse admins",
            Capability::CreateWarehouse => "create warehouses",
            Capability::RegisterProduct => "register products",
            Capability::AssignProduct => "assign products to warehouses",
        };
        f.write_str(phrase)
    }
}

impl UserType {
    /// Capabilities granted to this role, in dashboard order
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            UserType::Consumer => &[SearchProducts],
            UserType::ZeptoAppAdmin => &[
                InviteWarehouseAdmin,
                CreateWarehouse,
                RegisterProduct,
                AssignProduct,
            ],
            UserType::Maint => &[
                SearchProducts,
                InviteAppAdmin,
                InviteWarehouseAdmin,
                CreateWarehouse,
                RegisterProduct,
                AssignProduct,
            ],
            UserType::System | UserType::WarehouseAdmin | UserType::DeliveryPartner => &[],
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    pub fn dashboard_title(&self) -> &'static str {
        match self {
            UserType::Consumer => "Consumer Dashboard",
            UserType::ZeptoAppAdmin => "Admin Dashboard",
            UserType::Maint => "Maintenance Dashboard",
            _ => "Dashboard",
        }
    }

    /// Where a freshly signed-in user lands
    pub fn landing_view(&self) -> View {
        match self {
            UserType::Consumer => View::SearchProducts,
            _ => View::Dashboard,
        }
    }
}

/// What a view needs before it may be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    Capability(Capability),
}

/// Screens of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Home,
    SignIn,
    SignUp,
    Dashboard,
    SearchProducts,
    InviteAppAdmin,
    InviteWarehouseAdmin,
    CreateWarehouse,
    RegisterProduct,
    AssignProduct,
}

impl View {
    pub fn requirement(&self) -> Requirement {
        match self {
            View::Home | View::SignIn | View::SignUp => Requirement::Public,
            View::Dashboard => Requirement::Authenticated,
            View::SearchProducts => Requirement::Capability(Capability::SearchProducts),
            View::InviteAppAdmin => Requirement::Capability(Capability::InviteAppAdmin),
            View::InviteWarehouseAdmin => {
                Requirement::Capability(Capability::InviteWarehouseAdmin)
            }
            View::CreateWarehouse => Requirement::Capability(Capability::CreateWarehouse),
            View::RegisterProduct => Requirement::Capability(Capability::RegisterProduct),
            View::AssignProduct => Requirement::Capability(Capability::AssignProduct),
        }
    }

    /// Route path of the view
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::SignIn => "/signin",
            View::SignUp => "/signup",
            View::Dashboard => "/dashboard",
            View::SearchProducts => "/search-products",
            View::InviteAppAdmin => "/invite-admin",
            View::InviteWarehouseAdmin => "/invite-warehouse-admin",
            View::CreateWarehouse => "/create-warehouse",
            View::RegisterProduct => "/product-registration",
            View::AssignProduct => "/assign-product",
        }
    }
}

/// Outcome of the access gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToSignIn,
    Forbidden(Capability),
}

/// Decide whether `view` may be shown for `session`
pub fn access(view: View, session: &Session) -> Access {
    match view.requirement() {
        Requirement::Public => Access::Granted,
        Requirement::Authenticated => match session.user() {
            Some(_) => Access::Granted,
            None => Access::RedirectToSignIn,
        },
        Requirement::Capability(capability) => match session.user() {
            None => Access::RedirectToSignIn,
            Some(user) if user.user_type.can(capability) => Access::Granted,
            Some(_) => Access::Forbidden(capability),
        },
    }
}
