mod subscription;
mod views;

pub use subscription::SubscriptionService;
pub use views::ViewService;
