// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---
// 1. Role (os papéis que o backend atribui no login)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,         // Vira "ADMIN"
    BusinessOwner, // Vira "BUSINESS_OWNER"
    Collaborator,  // Vira "COLLABORATOR"
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::BusinessOwner, Role::Collaborator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::BusinessOwner => "BUSINESS_OWNER",
            Role::Collaborator => "COLLABORATOR",
        }
    }

    /// Papel desconhecido vira `None` (a verificação de permissão falha fechada).
    pub fn parse(value: &str) -> Option<Role> {
        value.parse().ok()
    }
}

impl FromStr for Role {
    type Err = UnknownSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownSlug(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---
// 2. Permission (capacidades atômicas, nunca combinadas)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    // Dashboard
    ViewDashboard,

    // Armazéns
    ViewWarehouses,
    CreateWarehouse,
    EditWarehouse,
    DeleteWarehouse,

    // Produtos
    ViewProducts,
    CreateProduct,
    EditProduct,
    DeleteProduct,
    UpdateStock,

    // Usuários
    ViewUsers,
    CreateUser,
    EditUser,
    DeleteUser,

    // Negócios
    ViewAllBusinesses,
}

impl Permission {
    pub const ALL: [Permission; 15] = [
        Permission::ViewDashboard,
        Permission::ViewWarehouses,
        Permission::CreateWarehouse,
        Permission::EditWarehouse,
        Permission::DeleteWarehouse,
        Permission::ViewProducts,
        Permission::CreateProduct,
        Permission::EditProduct,
        Permission::DeleteProduct,
        Permission::UpdateStock,
        Permission::ViewUsers,
        Permission::CreateUser,
        Permission::EditUser,
        Permission::DeleteUser,
        Permission::ViewAllBusinesses,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "VIEW_DASHBOARD",
            Permission::ViewWarehouses => "VIEW_WAREHOUSES",
            Permission::CreateWarehouse => "CREATE_WAREHOUSE",
            Permission::EditWarehouse => "EDIT_WAREHOUSE",
            Permission::DeleteWarehouse => "DELETE_WAREHOUSE",
            Permission::ViewProducts => "VIEW_PRODUCTS",
            Permission::CreateProduct => "CREATE_PRODUCT",
            Permission::EditProduct => "EDIT_PRODUCT",
            Permission::DeleteProduct => "DELETE_PRODUCT",
            Permission::UpdateStock => "UPDATE_STOCK",
            Permission::ViewUsers => "VIEW_USERS",
            Permission::CreateUser => "CREATE_USER",
            Permission::EditUser => "EDIT_USER",
            Permission::DeleteUser => "DELETE_USER",
            Permission::ViewAllBusinesses => "VIEW_ALL_BUSINESSES",
        }
    }
}

impl FromStr for Permission {
    type Err = UnknownSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.slug() == s)
            .ok_or_else(|| UnknownSlug(s.to_string()))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identificador desconhecido: '{0}'")]
pub struct UnknownSlug(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_through_from_str() {
        for p in Permission::ALL {
            assert_eq!(p.slug().parse::<Permission>(), Ok(p));
        }
        for r in Role::ALL {
            assert_eq!(Role::parse(r.as_str()), Some(r));
        }
    }

    #[test]
    fn unknown_or_differently_cased_role_is_rejected() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse("USER"), None);
        assert_eq!(Role::parse(""), None);
        assert!("VIEW_EVERYTHING".parse::<Permission>().is_err());
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&Role::BusinessOwner).unwrap(), "\"BUSINESS_OWNER\"");
        assert_eq!(
            serde_json::to_string(&Permission::ViewAllBusinesses).unwrap(),
            "\"VIEW_ALL_BUSINESSES\""
        );
    }
}
