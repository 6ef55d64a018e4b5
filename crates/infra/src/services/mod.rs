mod webhook;

pub use webhook::WaitlistWebhookNotifier;
