pub mod secure_file;
