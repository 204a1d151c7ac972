pub mod secure;
