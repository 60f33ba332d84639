/// Logging port used by the service layer.
///
/// Services receive it as `Arc<dyn Logger>` so the business crate never
/// depends on a concrete logging backend.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}
