// src/services/rbac_service.rs

use std::marker::PhantomData;

use crate::common::error::ApiError;
use crate::models::rbac::{Permission, Role};

use Permission::*;

// ---
// Mapa Papel -> Permissões
// ---
// Cada papel enumera explicitamente o que pode fazer. Não existe herança entre papéis.

const ADMIN_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewWarehouses,
    CreateWarehouse,
    EditWarehouse,
    DeleteWarehouse,
    ViewProducts,
    CreateProduct,
    EditProduct,
    DeleteProduct,
    UpdateStock,
    ViewUsers,
    CreateUser,
    EditUser,
    DeleteUser,
    ViewAllBusinesses,
];

// Dono de negócio: tudo do próprio negócio, sem VIEW_ALL_BUSINESSES
const BUSINESS_OWNER_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewWarehouses,
    CreateWarehouse,
    EditWarehouse,
    DeleteWarehouse,
    ViewProducts,
    CreateProduct,
    EditProduct,
    DeleteProduct,
    UpdateStock,
    ViewUsers,
    CreateUser,
    EditUser,
    DeleteUser,
];

// Colaborador: só visualiza e atualiza estoque
const COLLABORATOR_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewWarehouses,
    ViewProducts,
    UpdateStock,
];

pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::BusinessOwner => BUSINESS_OWNER_PERMISSIONS,
        Role::Collaborator => COLLABORATOR_PERMISSIONS,
    }
}

/// Verifica se o papel possui a permissão. Papel ausente nunca tem permissão.
pub fn has_permission(role: Option<Role>, permission: Permission) -> bool {
    match role {
        Some(role) => permissions_for(role).contains(&permission),
        None => false,
    }
}

/// Variante por texto, para valores vindos do backend ou da sessão persistida.
/// Qualquer identificador desconhecido resulta em `false`.
pub fn has_permission_slug(role: &str, permission: &str) -> bool {
    match permission.parse::<Permission>() {
        Ok(permission) => has_permission(Role::parse(role), permission),
        Err(_) => false,
    }
}

/// Pelo menos uma. Lista vazia -> `false`.
pub fn has_any_permission(role: Option<Role>, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(role, *p))
}

/// Todas. Lista vazia -> `true` (verdade vácua), para qualquer papel.
pub fn has_all_permissions(role: Option<Role>, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| has_permission(role, *p))
}

pub fn is_admin(role: Option<Role>) -> bool {
    role == Some(Role::Admin)
}

pub fn is_business_owner(role: Option<Role>) -> bool {
    role == Some(Role::BusinessOwner)
}

pub fn is_collaborator(role: Option<Role>) -> bool {
    role == Some(Role::Collaborator)
}

// As verificações "pode gerenciar" olham apenas a permissão CREATE_* correspondente.
// Editar e excluir seguem a mesma regra; quem precisar de granularidade usa has_permission.

pub fn can_manage_users(role: Option<Role>) -> bool {
    has_permission(role, CreateUser)
}

pub fn can_manage_warehouses(role: Option<Role>) -> bool {
    has_permission(role, CreateWarehouse)
}

pub fn can_manage_products(role: Option<Role>) -> bool {
    has_permission(role, CreateProduct)
}

pub fn get_role_label(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => "Administrador",
        Some(Role::BusinessOwner) => "Dono do Negócio",
        Some(Role::Collaborator) => "Colaborador",
        None => "Desconhecido",
    }
}

/// Barra a ação antes de qualquer requisição, com o mesmo erro que um 403 do backend.
pub fn ensure_permission(role: Option<Role>, permission: Permission) -> Result<(), ApiError> {
    if has_permission(role, permission) {
        return Ok(());
    }
    tracing::warn!(
        role = role.map(|r| r.as_str()).unwrap_or("NONE"),
        permission = permission.slug(),
        "Permissão negada"
    );
    Err(ApiError::forbidden())
}

// ---
// Guardião tipado
// ---

/// Uma permissão conhecida em tempo de compilação.
pub trait PermissionDef: Send + Sync + 'static {
    fn permission() -> Permission;
}

pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T: PermissionDef> RequirePermission<T> {
    pub fn check(role: Option<Role>) -> Result<Self, ApiError> {
        ensure_permission(role, T::permission())?;
        Ok(RequirePermission(PhantomData))
    }
}

pub struct PermCreateWarehouse;
impl PermissionDef for PermCreateWarehouse {
    fn permission() -> Permission { CreateWarehouse }
}

pub struct PermCreateProduct;
impl PermissionDef for PermCreateProduct {
    fn permission() -> Permission { CreateProduct }
}

pub struct PermUpdateStock;
impl PermissionDef for PermUpdateStock {
    fn permission() -> Permission { UpdateStock }
}

pub struct PermViewAllBusinesses;
impl PermissionDef for PermViewAllBusinesses {
    fn permission() -> Permission { ViewAllBusinesses }
}
