mod user_dto;

pub use user_dto::{RoleLookupDto, RoleQuery, UpdateRoleDto, UserResponseDto};
