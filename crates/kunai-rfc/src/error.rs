use thiserror::Error;

use crate::rfc::vcard::build::WriteError;
use crate::rfc::vcard::parse::ParseError;
use crate::rfc::vcard::transcode::TranscodeError;

/// Any error the vCard readers, writers or transcoders can return.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    CoreError(#[from] kunai_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
