pub mod oauth_dto;
