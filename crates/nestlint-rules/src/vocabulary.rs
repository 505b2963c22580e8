//! Decorator names exported by `class-validator`.

/// The optional-marker decorator; the only validation decorator that does
/// not imply a value is required.
pub const IS_OPTIONAL: &str = "IsOptional";

/// Property decorators exported by `class-validator`, without
/// `IsOptional`.
const CLASS_VALIDATOR_DECORATORS: &[&str] = &[
    "Allow",
    "ArrayContains",
    "ArrayMaxSize",
    "ArrayMinSize",
    "ArrayNotContains",
    "ArrayNotEmpty",
    "ArrayUnique",
    "Contains",
    "Equals",
    "IsAlpha",
    "IsAlphanumeric",
    "IsArray",
    "IsAscii",
    "IsBIC",
    "IsBase32",
    "IsBase58",
    "IsBase64",
    "IsBooleanString",
    "IsBoolean",
    "IsBtcAddress",
    "IsByteLength",
    "IsCreditCard",
    "IsCurrency",
    "IsDataURI",
    "IsDateString",
    "IsDate",
    "IsDecimal",
    "IsDefined",
    "IsDivisibleBy",
    "IsEAN",
    "IsEmail",
    "IsEmpty",
    "IsEnum",
    "IsEthereumAddress",
    "IsFQDN",
    "IsFirebasePushId",
    "IsFullWidth",
    "IsHSL",
    "IsHalfWidth",
    "IsHash",
    "IsHexColor",
    "IsHexadecimal",
    "IsIBAN",
    "IsIP",
    "IsISBN",
    "IsISIN",
    "IsISO31661Alpha2",
    "IsISO31661Alpha3",
    "IsISO4217CurrencyCode",
    "IsISO8601",
    "IsISRC",
    "IsISSN",
    "IsIdentityCard",
    "IsIn",
    "IsInstance",
    "IsInt",
    "IsJSON",
    "IsJWT",
    "IsLatLong",
    "IsLatitude",
    "IsLocale",
    "IsLongitude",
    "IsLowercase",
    "IsMACAddress",
    "IsMagnetURI",
    "IsMilitaryTime",
    "IsMimeType",
    "IsMobilePhone",
    "IsMongoId",
    "IsMultibyte",
    "IsNegative",
    "IsNotEmptyObject",
    "IsNotEmpty",
    "IsNotIn",
    "IsNumberString",
    "IsNumber",
    "IsObject",
    "IsOctal",
    "IsPassportNumber",
    "IsPhoneNumber",
    "IsPort",
    "IsPositive",
    "IsPostalCode",
    "IsRFC3339",
    "IsRgbColor",
    "IsSemVer",
    "IsString",
    "IsStrongPassword",
    "IsSurrogatePair",
    "IsTaxId",
    "IsTimeZone",
    "IsUUID",
    "IsUppercase",
    "IsUrl",
    "IsVariableWidth",
    "Length",
    "Matches",
    "Max",
    "MaxDate",
    "MaxLength",
    "Min",
    "MinDate",
    "MinLength",
    "NotContains",
    "NotEquals",
    "Validate",
    "ValidateBy",
    "ValidateIf",
    "ValidateNested",
    "ValidatePromise",
];

/// Whether `name` is a `class-validator` decorator other than `IsOptional`.
pub fn is_class_validator_decorator(name: &str) -> bool {
    CLASS_VALIDATOR_DECORATORS.contains(&name)
}
