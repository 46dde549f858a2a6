// src/types/mod.rs
pub mod company;
pub mod response;

pub use company::{
    ArticleFailure, ArticleRecord, CompanyProfile, CompanyRecord, SearchHit, COMPANY_FIELDS,
    NOT_AVAILABLE,
};
