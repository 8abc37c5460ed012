pub mod chat_transport;
