pub mod authservice {
    include!("gen/authservice.rs");
}
