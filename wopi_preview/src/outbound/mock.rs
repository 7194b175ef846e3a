//! This module provides [mockall::mock] concrete structs for the async
//! ports which can be used for testing

use crate::domain::ports::{CapabilitySource, ConfigSource, PermissionGateway};
use mockall::mock;
use models_wopi::{capability::WopiFileInfo, config::FeatureConfig, edit_scope::EditScope};
use std::collections::HashMap;
use std::convert::Infallible;

const _NOT_PROD: () = const {
    assert!(
        cfg!(debug_assertions),
        "You are trying to include mock code in a production build please run `cargo tree -i wopi_preview -e features -p <FAILING_PACKAGE>` to see how the mock feature is being included in [dependencies]"
    );
};

mock! {
    /// mock of the edit-scope persistence port
    pub PermissionGateway {}
    impl PermissionGateway for PermissionGateway {
        type Err = Infallible;

        fn update_file_permission(&self, file_id: &str, scope: EditScope) -> impl Future<Output = Result<(), Infallible>> + Send;
    }
}

mock! {
    /// mock of the configuration fetch port
    pub ConfigSource {}
    impl ConfigSource for ConfigSource {
        type Err = Infallible;

        fn get_feature_config(&self) -> impl Future<Output = Result<FeatureConfig, Infallible>> + Send;
    }
}

mock! {
    /// mock of the capability fetch port
    pub CapabilitySource {}
    impl CapabilitySource for CapabilitySource {
        type Err = Infallible;

        fn get_file_list(&self) -> impl Future<Output = Result<HashMap<String, WopiFileInfo>, Infallible>> + Send;
    }
}
