pub mod template_manager;
