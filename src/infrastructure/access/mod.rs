pub mod permission_port_static;
