pub mod contact_dto;
