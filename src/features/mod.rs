/// Feature modules built on top of the dataset pipeline
pub mod dashboard;
