//! Registered mechanism, name-type and mechanism-attribute OIDs.
//!
//! Mechanism attributes are the `GSS_C_MA_*` values from RFC 5587, all under
//! the `1.3.6.1.5.5.13` arc.

use super::Oid;

// Mechanisms.

/// Kerberos 5, `1.2.840.113554.1.2.2`.
pub const KRB5: Oid = Oid::from_static(&[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x12, 0x01, 0x02, 0x02]);
/// Pre-RFC Microsoft Kerberos OID, `1.2.840.48018.1.2.2`.
pub const KRB5_LEGACY: Oid =
    Oid::from_static(&[0x2a, 0x86, 0x48, 0x82, 0xf7, 0x12, 0x01, 0x02, 0x02]);
/// `1.3.6.1.5.2.5`
pub const IAKERB: Oid = Oid::from_static(&[0x2b, 0x06, 0x01, 0x05, 0x02, 0x05]);
/// `1.3.6.1.5.5.2`
pub const SPNEGO: Oid = Oid::from_static(&[0x2b, 0x06, 0x01, 0x05, 0x05, 0x02]);
/// `1.3.6.1.4.1.311.2.2.10`
pub const NTLMSSP: Oid =
    Oid::from_static(&[0x2b, 0x06, 0x01, 0x04, 0x01, 0x82, 0x37, 0x02, 0x02, 0x0a]);

// Name types.

pub const NT_USER_NAME: Oid =
    Oid::from_static(&[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x12, 0x01, 0x02, 0x01, 0x01]);
pub const NT_HOSTBASED_SERVICE: Oid =
    Oid::from_static(&[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x12, 0x01, 0x02, 0x01, 0x04]);
pub const NT_ANONYMOUS: Oid = Oid::from_static(&[0x2b, 0x06, 0x01, 0x05, 0x06, 0x03]);
pub const NT_EXPORT_NAME: Oid = Oid::from_static(&[0x2b, 0x06, 0x01, 0x05, 0x06, 0x04]);
pub const KRB5_NT_PRINCIPAL_NAME: Oid =
    Oid::from_static(&[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x12, 0x01, 0x02, 0x02, 0x01]);

// Mechanism attributes.

macro_rules! mech_attr {
    ($($name:ident = $leaf:literal;)*) => {
        $(pub const $name: Oid =
            Oid::from_static(&[0x2b, 0x06, 0x01, 0x05, 0x05, 0x0d, $leaf]);)*

        #[cfg(test)]
        const MECH_ATTRS: &[(Oid, u8)] = &[$(($name, $leaf)),*];
    };
}

mech_attr! {
    MA_MECH_CONCRETE = 1;
    MA_MECH_PSEUDO = 2;
    MA_MECH_COMPOSITE = 3;
    MA_MECH_NEGO = 4;
    MA_MECH_GLUE = 5;
    MA_NOT_MECH = 6;
    MA_DEPRECATED = 7;
    MA_NOT_DFLT_MECH = 8;
    MA_ITOK_FRAMED = 9;
    MA_AUTH_INIT = 10;
    MA_AUTH_TARG = 11;
    MA_AUTH_INIT_INIT = 12;
    MA_AUTH_TARG_INIT = 13;
    MA_AUTH_INIT_ANON = 14;
    MA_AUTH_TARG_ANON = 15;
    MA_DELEG_CRED = 16;
    MA_INTEG_PROT = 17;
    MA_CONF_PROT = 18;
    MA_MIC = 19;
    MA_WRAP = 20;
    MA_PROT_READY = 21;
    MA_REPLAY_DET = 22;
    MA_OOS_DET = 23;
    MA_CBINDINGS = 24;
    MA_PFS = 25;
    MA_COMPRESS = 26;
    MA_CTX_TRANS = 27;
}
