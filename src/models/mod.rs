pub mod data_address;
pub mod data_flow;
pub mod messages;
pub mod transfer_type;

pub use data_address::{DataAddress, EndpointProperty};
pub use data_flow::{DataFlow, DataFlowState};
pub use messages::{
    DataFlowPrepareMessage, DataFlowResponseMessage, DataFlowStartMessage,
    DataFlowStartedNotificationMessage, DataFlowStatusResponseMessage, DataFlowTerminateMessage,
};
pub use transfer_type::{FlowType, TransferType};
