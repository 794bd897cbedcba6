pub mod tenant;

pub use tenant::{Tenant, TENANT_ID_HEADER, TENANT_LOGIN_HEADER};
