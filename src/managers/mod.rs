// Stateful per-tab bookkeeping layered over the services.

pub mod tab_telemetry;
