pub trait DomainEvent: Send + Sync {
    fn aggregate_id(&self) -> String;
}
