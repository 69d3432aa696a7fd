pub mod contact_router;
