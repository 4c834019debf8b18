pub mod pdf_service;
